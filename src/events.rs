//! Movement notifications.
//!
//! A [`CardMoved`] is dispatched from the node that performed the move and
//! bubbles through every ancestor up to the document. Listeners attached to
//! any node on that path see it, innermost first. Channel subscribers see
//! every notification after the listeners.

use crate::{
    domain::{CardId, ColumnId, NodeRef},
    drag::session::Modality,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// Input path that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveSource {
    Pointer,
    Touch,
    Keyboard,
    NativeDrop,
}

impl From<Modality> for MoveSource {
    fn from(modality: Modality) -> Self {
        match modality {
            Modality::Pointer => Self::Pointer,
            Modality::Touch => Self::Touch,
        }
    }
}

/// Notification that a card landed in a new position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMoved {
    /// Destination column
    pub column: ColumnId,
    pub card: CardId,
    /// Card identity; not set for native drops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    /// Index of the card in the destination column after the move
    pub index: usize,
    pub source: MoveSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CardMoved)>;

/// Listener registry and channel fan-out
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, NodeRef, Listener)>,
    subscribers: Vec<mpsc::UnboundedSender<CardMoved>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        node: NodeRef,
        listener: impl FnMut(&CardMoved) + 'static,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, node, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CardMoved> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Delivers an event along a propagation path, innermost node first
    pub fn dispatch(&mut self, event: &CardMoved, path: &[NodeRef]) {
        for node in path {
            for (_, target, listener) in self.listeners.iter_mut() {
                if target == node {
                    listener(event);
                }
            }
        }

        // Dropped receivers are pruned here
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
