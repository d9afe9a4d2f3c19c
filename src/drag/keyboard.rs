//! Keyboard reordering.
//!
//! Arrow keys move a card one step within its column synchronously; there is
//! no proxy and no session. Enter and Space only set the grabbed flag.

use crate::{
    document::Document,
    domain::{CardId, NodeRef, Placement},
    drag::session::CancelReason,
    error::{BoardError, Result},
    events::{CardMoved, MoveSource},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the key's default browser action should be suppressed
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    fn direction(&self) -> Option<isize> {
        match self {
            Self::ArrowUp => Some(-1),
            Self::ArrowDown => Some(1),
            _ => None,
        }
    }
}

impl Document {
    /// Handles a key pressed while a card has focus
    pub fn key_down(&mut self, card: &CardId, key: &Key) -> Result<Option<CardMoved>> {
        let Some(entry) = self.board.card_mut(card) else {
            return Err(BoardError::CardNotFound(card.to_string()));
        };

        match key {
            Key::Enter | Key::Space => {
                entry.grabbed = true;
                Ok(None)
            }
            Key::Escape => {
                entry.grabbed = false;
                if self.active.as_ref().map(|a| &a.card) == Some(card) {
                    self.cancel_drag(CancelReason::Escape);
                }
                Ok(None)
            }
            Key::ArrowUp | Key::ArrowDown => {
                if entry.is_dragging() {
                    tracing::debug!(card = %card, "arrow key ignored during a tracked drag");
                    return Ok(None);
                }
                let direction = key.direction().unwrap_or_default();
                Ok(self.step(card, direction))
            }
            Key::Other(_) => Ok(None),
        }
    }

    /// Swaps a card with its neighbour; no-op at either end of the column
    fn step(&mut self, card: &CardId, direction: isize) -> Option<CardMoved> {
        let column = self.board.column_of(card)?.clone();
        let list = self.board.column(&column)?.card_ids();

        let index = list.index_of(card)?;
        let target = index.checked_add_signed(direction)?;
        let reference = list.get(target)?;

        let placement = if direction > 0 {
            match list.next(reference) {
                Some(after) => Placement::Before(after.clone()),
                None => Placement::Append,
            }
        } else {
            Placement::Before(reference.clone())
        };

        let relocation = self
            .board
            .relocate(card, &column, placement)
            .filter(|r| r.changed())?;
        tracing::debug!(card = %card, index = relocation.to.index, "card moved by keyboard");

        let event = CardMoved {
            column,
            card: card.clone(),
            id: Some(card.clone()),
            index: relocation.to.index,
            source: MoveSource::Keyboard,
        };
        Some(self.emit(event, NodeRef::Card(card.clone())))
    }
}
