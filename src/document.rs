use crate::{
    config::DocumentConfig,
    domain::{Board, Card, CardId, Column, ColumnId, NodeRef, Presence},
    drag::{
        proxy::Overlay,
        session::{ActiveDrag, CancelReason},
    },
    events::{CardMoved, EventBus, ListenerId},
};
use tokio::sync::mpsc;

/// Document root: the board, the overlay proxies are appended to, the
/// active-drag slot and the notification bus.
///
/// Input handlers live in [`crate::drag`]; they all take `&mut self`, so a
/// document is driven from a single event loop.
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) board: Board,
    pub(crate) overlay: Overlay,
    pub(crate) active: Option<ActiveDrag>,
    pub(crate) events: EventBus,
    pub(crate) config: DocumentConfig,
}

impl Document {
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_board(Board::new(), config)
    }

    pub fn with_board(board: Board, config: DocumentConfig) -> Self {
        Self {
            board,
            overlay: Overlay::new(),
            active: None,
            events: EventBus::new(),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for composing the board (adding columns and cards)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The drag currently holding the document-wide slot
    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Attaches a movement listener to a node of the board tree
    pub fn add_listener(
        &mut self,
        node: NodeRef,
        listener: impl FnMut(&CardMoved) + 'static,
    ) -> ListenerId {
        self.events.add_listener(node, listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }

    /// Receives every movement notification at the document level
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CardMoved> {
        self.events.subscribe()
    }

    /// Removes a card, cancelling its drag first if it is being dragged
    pub fn remove_card(&mut self, id: &CardId) -> Option<Card> {
        if self.active.as_ref().map(|a| &a.card) == Some(id) {
            self.cancel_drag(CancelReason::Detached);
        }
        self.board.remove_card(id)
    }

    /// Removes a column and its cards, cancelling a drag of any of them
    pub fn remove_column(&mut self, id: &ColumnId) -> Option<(Column, Vec<Card>)> {
        let dragging_here = self
            .active
            .as_ref()
            .and_then(|a| self.board.column_of(&a.card))
            .map(|column| column == id)
            .unwrap_or(false);
        if dragging_here {
            self.cancel_drag(CancelReason::Detached);
        }
        self.board.remove_column(id)
    }

    /// Ends the active drag without placing the card.
    ///
    /// The proxy is removed and the card shown again in its original slot.
    /// Returns false when no drag was active.
    pub fn cancel_drag(&mut self, reason: CancelReason) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        self.end_session(&active.card);
        tracing::debug!(card = %active.card, ?reason, "drag cancelled");
        true
    }

    /// Releases everything a drag session holds
    pub(crate) fn end_session(&mut self, card: &CardId) {
        let Some(card) = self.board.card_mut(card) else {
            return;
        };
        if let Some(session) = card.session() {
            let proxy = session.proxy;
            self.overlay.remove(proxy);
        }
        card.drag = Default::default();
        card.presence = Presence::Visible;
    }

    /// Dispatches a notification from `origin` through its ancestors
    pub(crate) fn emit(&mut self, event: CardMoved, origin: NodeRef) -> CardMoved {
        let path = origin.path(&self.board);
        self.events.dispatch(&event, &path);
        event
    }
}
