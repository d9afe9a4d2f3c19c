use crate::domain::card::CardId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Links {
    prev: Option<CardId>,
    next: Option<CardId>,
}

/// Ordered sequence of cards inside a column.
///
/// The order of this list is the visual order; there is no separate index
/// to keep in sync. Insertion before a known card, appending and removal are
/// all O(1).
#[derive(Debug, Clone, Default)]
pub struct CardList {
    links: HashMap<CardId, Links>,
    head: Option<CardId>,
    tail: Option<CardId>,
}

impl CardList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.links.contains_key(id)
    }

    pub fn first(&self) -> Option<&CardId> {
        self.head.as_ref()
    }

    pub fn last(&self) -> Option<&CardId> {
        self.tail.as_ref()
    }

    pub fn next(&self, id: &CardId) -> Option<&CardId> {
        self.links.get(id).and_then(|l| l.next.as_ref())
    }

    pub fn prev(&self, id: &CardId) -> Option<&CardId> {
        self.links.get(id).and_then(|l| l.prev.as_ref())
    }

    /// Appends a card as the last entry. Returns false if it is already present.
    pub fn push_back(&mut self, id: CardId) -> bool {
        if self.contains(&id) {
            return false;
        }

        let links = Links {
            prev: self.tail.clone(),
            next: None,
        };
        match self.tail.as_ref() {
            Some(tail) => {
                if let Some(tail_links) = self.links.get_mut(tail) {
                    tail_links.next = Some(id.clone());
                }
            }
            None => self.head = Some(id.clone()),
        }
        self.tail = Some(id.clone());
        self.links.insert(id, links);
        true
    }

    /// Inserts `id` immediately before `reference`.
    ///
    /// Returns false if `id` is already present or `reference` is not.
    pub fn insert_before(&mut self, id: CardId, reference: &CardId) -> bool {
        if self.contains(&id) || !self.contains(reference) {
            return false;
        }

        let prev = self.links.get(reference).and_then(|l| l.prev.clone());
        match prev.as_ref() {
            Some(p) => {
                if let Some(prev_links) = self.links.get_mut(p) {
                    prev_links.next = Some(id.clone());
                }
            }
            None => self.head = Some(id.clone()),
        }
        if let Some(ref_links) = self.links.get_mut(reference) {
            ref_links.prev = Some(id.clone());
        }
        self.links.insert(
            id,
            Links {
                prev,
                next: Some(reference.clone()),
            },
        );
        true
    }

    /// Unlinks a card. Returns false if it was not in the list.
    pub fn remove(&mut self, id: &CardId) -> bool {
        let Some(links) = self.links.remove(id) else {
            return false;
        };

        match links.prev.as_ref() {
            Some(p) => {
                if let Some(prev_links) = self.links.get_mut(p) {
                    prev_links.next = links.next.clone();
                }
            }
            None => self.head = links.next.clone(),
        }
        match links.next.as_ref() {
            Some(n) => {
                if let Some(next_links) = self.links.get_mut(n) {
                    next_links.prev = links.prev.clone();
                }
            }
            None => self.tail = links.prev.clone(),
        }
        true
    }

    /// Position of a card in visual order
    pub fn index_of(&self, id: &CardId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.iter().position(|c| c == id)
    }

    pub fn get(&self, index: usize) -> Option<&CardId> {
        self.iter().nth(index)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head.as_ref(),
        }
    }

    pub fn to_vec(&self) -> Vec<CardId> {
        self.iter().cloned().collect()
    }
}

pub struct Iter<'a> {
    list: &'a CardList,
    cursor: Option<&'a CardId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CardId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.list.next(current);
        Some(current)
    }
}

impl<'a> IntoIterator for &'a CardList {
    type Item = &'a CardId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<CardId> for CardList {
    fn from_iter<T: IntoIterator<Item = CardId>>(iter: T) -> Self {
        let mut list = CardList::new();
        for id in iter {
            list.push_back(id);
        }
        list
    }
}
