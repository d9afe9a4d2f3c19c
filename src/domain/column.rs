use crate::domain::card_list::CardList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen identity of a column, used for lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Data used to create a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

impl ColumnSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A column holding an ordered list of cards
#[derive(Debug, Clone)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub(crate) cards: CardList,
    /// Drop-zone highlight while a native drag hovers the column
    pub drag_over: bool,
}

impl Column {
    pub const DEFAULT_TITLE: &'static str = "Column";

    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.is_empty() {
            Self::DEFAULT_TITLE.to_string()
        } else {
            title
        };

        Self {
            id,
            title,
            cards: CardList::new(),
            drag_over: false,
        }
    }

    pub fn from_spec(spec: ColumnSpec) -> Self {
        Self::new(ColumnId::from(spec.id), spec.title)
    }

    /// Card identities in visual order
    pub fn card_ids(&self) -> &CardList {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Columns always accept cards
    pub fn accepts_cards(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_creation() {
        let column = Column::from_spec(ColumnSpec::new("todo", "To Do"));
        assert_eq!(column.id.as_str(), "todo");
        assert_eq!(column.title, "To Do");
        assert!(column.is_empty());
        assert!(!column.drag_over);
        assert!(column.accepts_cards());
    }

    #[test]
    fn test_empty_title_defaults() {
        let column = Column::new(ColumnId::new("x"), "");
        assert_eq!(column.title, Column::DEFAULT_TITLE);
    }

    #[test]
    fn test_spec_deserialization() {
        let spec: ColumnSpec = serde_json::from_str(r#"{"id": "done"}"#).unwrap();
        assert_eq!(spec.id, "done");
        assert!(spec.title.is_empty());
    }
}
