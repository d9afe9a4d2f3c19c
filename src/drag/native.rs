//! The platform drag-and-drop protocol.
//!
//! Independent of tracked drags: a column's drop zone highlights while a
//! native drag hovers it and, on drop, appends the card described by the
//! `text/plain` payload. Only payloads that parse as a card are accepted.

use crate::{
    document::Document,
    domain::{Card, CardId, ColumnId, NodeRef, Placement, Presence},
    events::{CardMoved, MoveSource},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Platform transfer object: payloads keyed by MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTransfer {
    items: BTreeMap<String, String>,
}

impl DataTransfer {
    pub const TEXT: &'static str = "text/plain";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, format: impl Into<String>, data: impl Into<String>) {
        self.items.insert(format.into(), data.into());
    }

    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.items.get(format).map(String::as_str)
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Plain-text transfer carrying a card
    pub fn for_card(card: &Card) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(Self::TEXT, TransferItem::from(card).to_payload());
        transfer
    }
}

/// A value carried by a native drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransferItem {
    Card {
        id: CardId,
        #[serde(default)]
        title: String,
    },
    #[serde(other)]
    Other,
}

impl TransferItem {
    /// Parses a text payload; anything malformed yields `None`
    pub fn parse(payload: &str) -> Option<Self> {
        match serde_json::from_str(payload) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("unreadable drop payload: {}", e);
                None
            }
        }
    }

    pub fn to_payload(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Self::Card { .. })
    }
}

impl From<&Card> for TransferItem {
    fn from(card: &Card) -> Self {
        Self::Card {
            id: card.id.clone(),
            title: card.label.clone(),
        }
    }
}

impl Document {
    /// Starts carrying a card with the native protocol.
    ///
    /// The card leaves the flow and is marked as dragging until it is
    /// dropped or the drag ends. A card already held by a pointer or touch
    /// drag is refused.
    pub fn native_drag_start(&mut self, card: &CardId) -> Option<DataTransfer> {
        let entry = self.board.card_mut(card)?;
        if entry.is_dragging() {
            tracing::debug!(card = %card, "native drag refused during a tracked drag");
            return None;
        }
        entry.dragging = true;
        entry.presence = Presence::Removed;
        Some(DataTransfer::for_card(entry))
    }

    /// Restores a card whose native drag ended without a drop
    pub fn native_drag_end(&mut self, card: &CardId) {
        if let Some(entry) = self.board.card_mut(card) {
            restore(entry);
        }
    }

    /// Highlights a drop zone. Returns true when the column accepts the drop.
    pub fn native_drag_over(&mut self, column: &ColumnId) -> bool {
        match self.board.column_mut(column) {
            Some(col) if col.accepts_cards() => {
                col.drag_over = true;
                true
            }
            _ => false,
        }
    }

    pub fn native_drag_leave(&mut self, column: &ColumnId) {
        if let Some(col) = self.board.column_mut(column) {
            col.drag_over = false;
        }
    }

    /// Appends the dropped card to the end of the column
    pub fn native_drop(&mut self, column: &ColumnId, transfer: &DataTransfer) -> Option<CardMoved> {
        let col = self.board.column_mut(column)?;
        col.drag_over = false;

        let item = transfer
            .get_data(DataTransfer::TEXT)
            .and_then(TransferItem::parse)?;
        let TransferItem::Card { id, title } = item else {
            tracing::debug!(column = %column, "ignoring drop of a non-card item");
            return None;
        };

        let moved = if self.board.card(&id).is_some() {
            self.board
                .relocate(&id, column, Placement::Append)
                .map(|r| r.changed())
                .unwrap_or(false)
        } else {
            self.board
                .attach(column, Card::new(Some(id.clone()), title), Placement::Append)
                .is_some()
        };

        if let Some(entry) = self.board.card_mut(&id) {
            restore(entry);
        }
        if !moved {
            return None;
        }

        let index = self.board.slot_of(&id)?.index;
        tracing::debug!(card = %id, column = %column, index, "card dropped natively");
        let event = CardMoved {
            column: column.clone(),
            card: id,
            id: None,
            index,
            source: MoveSource::NativeDrop,
        };
        Some(self.emit(event, NodeRef::Column(column.clone())))
    }
}

fn restore(card: &mut Card) {
    card.dragging = false;
    if card.presence == Presence::Removed {
        card.presence = Presence::Visible;
    }
}
