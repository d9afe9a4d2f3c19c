use crate::drag::session::DragSession;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_CARD_NUMBER: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a card (e.g., `task-1`, `kanban-card-3-lz1k2m0a`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    const GENERATED_PREFIX: &'static str = "kanban-card";

    /// Wraps a caller-supplied identity
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a session-unique identity from a process-wide counter and
    /// the creation timestamp
    pub fn generate() -> Self {
        let counter = NEXT_CARD_NUMBER.fetch_add(1, Ordering::Relaxed) + 1;
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        Self(format!(
            "{}-{}-{}",
            Self::GENERATED_PREFIX,
            counter,
            to_base36(millis)
        ))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// How a card takes part in rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Rendered normally
    #[default]
    Visible,
    /// Invisible but still occupying its slot in the column
    Hidden,
    /// Taken out of the flow entirely
    Removed,
}

/// Drag lifecycle of a single card
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }
}

/// Data used to create a card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
}

impl CardSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A movable card on the board
#[derive(Debug, Clone)]
pub struct Card {
    pub id: CardId,
    pub label: String,
    /// Accessibility "grabbed" state toggled from the keyboard
    pub grabbed: bool,
    pub presence: Presence,
    /// Set while the card is being carried by the native drag protocol
    pub dragging: bool,
    pub(crate) drag: DragState,
}

impl Card {
    pub const DEFAULT_LABEL: &'static str = "Card";

    /// Creates a card, generating an identity when none (or an empty one) is given
    pub fn new(id: Option<CardId>, label: impl Into<String>) -> Self {
        let id = id
            .filter(|id| !id.as_str().is_empty())
            .unwrap_or_else(CardId::generate);
        let label = label.into();
        let label = if label.is_empty() {
            Self::DEFAULT_LABEL.to_string()
        } else {
            label
        };

        Self {
            id,
            label,
            grabbed: false,
            presence: Presence::Visible,
            dragging: false,
            drag: DragState::Idle,
        }
    }

    pub fn from_spec(spec: CardSpec) -> Self {
        Self::new(spec.id.map(CardId::from), spec.title)
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Returns the active drag session, if any
    pub fn session(&self) -> Option<&DragSession> {
        match &self.drag {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.presence == Presence::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_id_is_kept() {
        let card = Card::new(Some(CardId::new("task-1")), "Fix bug");
        assert_eq!(card.id.as_str(), "task-1");
        assert_eq!(card.label, "Fix bug");
        assert!(!card.grabbed);
        assert!(card.is_visible());
        assert!(!card.is_dragging());
    }

    #[test]
    fn test_missing_or_empty_id_is_generated() {
        let a = Card::new(None, "A");
        let b = Card::new(Some(CardId::new("")), "B");

        assert!(a.id.as_str().starts_with("kanban-card-"));
        assert!(b.id.as_str().starts_with("kanban-card-"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::HashSet<CardId> =
            (0..100).map(|_| CardId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_empty_label_defaults() {
        let card = Card::from_spec(CardSpec::new(""));
        assert_eq!(card.label, Card::DEFAULT_LABEL);
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
