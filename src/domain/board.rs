use crate::domain::{
    card::{Card, CardId, CardSpec},
    column::{Column, ColumnId, ColumnSpec},
};
use std::collections::HashMap;

/// Where a relocated card lands inside its destination column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the given card
    Before(CardId),
    /// After the last card
    Append,
}

/// A card's slot: its column and index in visual order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub column: ColumnId,
    pub index: usize,
}

/// Outcome of [`Board::relocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub card: CardId,
    pub from: Slot,
    pub to: Slot,
}

impl Relocation {
    /// Whether the card actually moved
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Kanban board state: ordered columns and the cards they hold
#[derive(Debug, Default)]
pub struct Board {
    columns: Vec<Column>,
    cards: HashMap<CardId, Card>,
    parents: HashMap<CardId, ColumnId>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column at the end of the board
    pub fn add_column(&mut self, spec: ColumnSpec) -> Option<ColumnId> {
        if self.find_column(&spec.id).is_some() {
            tracing::warn!("Column \"{}\" already exists.", spec.id);
            return None;
        }

        let column = Column::from_spec(spec);
        let id = column.id.clone();
        self.columns.push(column);
        Some(id)
    }

    /// Creates a card at the end of the column with the given identity
    pub fn add_card(&mut self, column_id: &str, spec: CardSpec) -> Option<CardId> {
        let Some(index) = self.find_column(column_id) else {
            tracing::warn!("Column \"{}\" not found.", column_id);
            return None;
        };

        let card = Card::from_spec(spec);
        let column = self.columns[index].id.clone();
        self.attach(&column, card, Placement::Append)
    }

    /// Inserts a new card into a column
    pub(crate) fn attach(
        &mut self,
        column_id: &ColumnId,
        card: Card,
        placement: Placement,
    ) -> Option<CardId> {
        if self.cards.contains_key(&card.id) {
            tracing::warn!("Card \"{}\" already exists.", card.id);
            return None;
        }
        let index = self.find_column(column_id.as_str())?;

        let id = card.id.clone();
        let list = &mut self.columns[index].cards;
        let inserted = match &placement {
            Placement::Before(reference) => list.insert_before(id.clone(), reference),
            Placement::Append => false,
        };
        if !inserted {
            list.push_back(id.clone());
        }

        self.parents.insert(id.clone(), column_id.clone());
        self.cards.insert(id.clone(), card);
        Some(id)
    }

    /// Returns all columns in board order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the cards of a column in visual order, or nothing if the
    /// column does not exist
    pub fn cards(&self, column_id: &str) -> Vec<&Card> {
        match self.find_column(column_id) {
            Some(index) => self.columns[index]
                .cards
                .iter()
                .filter_map(|id| self.cards.get(id))
                .collect(),
            None => {
                tracing::warn!("Column \"{}\" not found.", column_id);
                Vec::new()
            }
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.find_column(id.as_str()).map(|i| &self.columns[i])
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.find_column(id.as_str()).map(|i| &mut self.columns[i])
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub(crate) fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    /// The column currently holding a card
    pub fn column_of(&self, card: &CardId) -> Option<&ColumnId> {
        self.parents.get(card)
    }

    /// The column and index currently holding a card
    pub fn slot_of(&self, card: &CardId) -> Option<Slot> {
        let column = self.parents.get(card)?;
        let index = self.column(column)?.cards.index_of(card)?;
        Some(Slot {
            column: column.clone(),
            index,
        })
    }

    /// Moves a card to a placement inside a column.
    ///
    /// This is the single mutation every input path goes through. The card
    /// is unlinked from its current column before being linked into the
    /// destination, so it is never held by two columns. A `Before` reference
    /// that is not in the destination column, or is the card itself, falls
    /// back to the card's current slot when moving within one column and to
    /// appending otherwise.
    pub fn relocate(
        &mut self,
        card: &CardId,
        column: &ColumnId,
        placement: Placement,
    ) -> Option<Relocation> {
        let from = self.slot_of(card)?;
        let dest = self.find_column(column.as_str())?;

        let placement = match placement {
            Placement::Before(reference)
                if &reference == card || !self.columns[dest].cards.contains(&reference) =>
            {
                if &from.column == column {
                    return Some(Relocation {
                        card: card.clone(),
                        to: from.clone(),
                        from,
                    });
                }
                Placement::Append
            }
            other => other,
        };

        if let Some(src) = self.find_column(from.column.as_str()) {
            self.columns[src].cards.remove(card);
        }

        let list = &mut self.columns[dest].cards;
        match &placement {
            Placement::Before(reference) => {
                list.insert_before(card.clone(), reference);
            }
            Placement::Append => {
                list.push_back(card.clone());
            }
        }
        self.parents.insert(card.clone(), column.clone());

        let to = self.slot_of(card)?;
        Some(Relocation {
            card: card.clone(),
            from,
            to,
        })
    }

    /// Detaches a card from its column and drops it from the board
    pub(crate) fn remove_card(&mut self, id: &CardId) -> Option<Card> {
        let card = self.cards.remove(id)?;
        if let Some(column) = self.parents.remove(id) {
            if let Some(column) = self.column_mut(&column) {
                column.cards.remove(id);
            }
        }
        Some(card)
    }

    /// Detaches a column together with the cards it holds
    pub(crate) fn remove_column(&mut self, id: &ColumnId) -> Option<(Column, Vec<Card>)> {
        let index = self.find_column(id.as_str())?;
        let column = self.columns.remove(index);

        let cards = column
            .cards
            .iter()
            .filter_map(|card| {
                self.parents.remove(card);
                self.cards.remove(card)
            })
            .collect();

        Some((column, cards))
    }

    fn find_column(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id.as_str() == id)
    }
}
