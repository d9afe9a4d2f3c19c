//! Pointer and touch tracked drags.
//!
//! A drag picks the card up at its current box, hides it in place and puts
//! a proxy in the overlay. Moves only reposition the proxy. On release the
//! card is dropped before the first card of the target column whose
//! vertical midpoint lies below the release point, or appended when there is
//! none; the proxy is removed and the card shown again on every path.

use crate::{
    config::ConcurrentStart,
    document::Document,
    domain::{CardId, DragState, NodeRef, Placement, Presence},
    drag::{
        proxy::Proxy,
        session::{ActiveDrag, CancelReason, DragSession, Modality},
    },
    error::{BoardError, Result},
    events::{CardMoved, MoveSource},
    layout::{Geometry, Point, Rect},
};

/// Picks the insertion placement for a drop at `drop_y`.
///
/// `candidates` are the destination's cards in visual order, without the
/// card being dropped.
pub fn insertion_placement<I>(drop_y: f64, candidates: I) -> Placement
where
    I: IntoIterator<Item = (CardId, Rect)>,
{
    candidates
        .into_iter()
        .find(|(_, rect)| drop_y < rect.vertical_midpoint())
        .map(|(id, _)| Placement::Before(id))
        .unwrap_or(Placement::Append)
}

impl Document {
    pub fn pointer_down<G: Geometry + ?Sized>(
        &mut self,
        card: &CardId,
        at: Point,
        geometry: &G,
    ) -> Result<()> {
        self.start_drag(card, at, Modality::Pointer, geometry)
    }

    /// Returns false when no pointer drag is active
    pub fn pointer_move(&mut self, at: Point) -> bool {
        self.move_active(Modality::Pointer, at)
    }

    pub fn pointer_up<G: Geometry + ?Sized>(
        &mut self,
        at: Point,
        geometry: &G,
    ) -> Option<CardMoved> {
        if !self.is_active(Modality::Pointer) {
            return None;
        }
        self.finish_drag(at, geometry)
    }

    /// Starts a touch drag from the first touch point
    pub fn touch_start<G: Geometry + ?Sized>(
        &mut self,
        card: &CardId,
        touches: &[Point],
        geometry: &G,
    ) -> Result<()> {
        let Some(&first) = touches.first() else {
            tracing::debug!(card = %card, "touch start without touch points ignored");
            return Ok(());
        };
        self.start_drag(card, first, Modality::Touch, geometry)
    }

    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        match touches.first() {
            Some(&first) => self.move_active(Modality::Touch, first),
            None => false,
        }
    }

    /// Finishes a touch drag at the first changed touch point
    pub fn touch_end<G: Geometry + ?Sized>(
        &mut self,
        changed_touches: &[Point],
        geometry: &G,
    ) -> Option<CardMoved> {
        if !self.is_active(Modality::Touch) {
            return None;
        }
        match changed_touches.first() {
            Some(&at) => self.finish_drag(at, geometry),
            None => {
                self.cancel_drag(CancelReason::InputLost);
                None
            }
        }
    }

    /// Picks a card up at `at`.
    ///
    /// Fails if the card is unknown, has no box, or another drag holds the
    /// slot and the configuration rejects concurrent starts.
    pub fn start_drag<G: Geometry + ?Sized>(
        &mut self,
        card: &CardId,
        at: Point,
        modality: Modality,
        geometry: &G,
    ) -> Result<()> {
        if self.board.card(card).is_none() {
            return Err(BoardError::CardNotFound(card.to_string()));
        }
        let rect = geometry
            .card_rect(&self.board, card)
            .ok_or_else(|| BoardError::NoGeometry(card.to_string()))?;

        // The running drag is only given up once this start cannot fail
        if let Some(active) = self.active.clone() {
            match self.config.drag.concurrent_start {
                ConcurrentStart::Reject => {
                    return Err(BoardError::DragInProgress(active.card.to_string()));
                }
                ConcurrentStart::Preempt => {
                    self.cancel_drag(CancelReason::Preempted);
                }
            }
        }

        let offset = at.offset_from(rect.origin());

        let Some(entry) = self.board.card_mut(card) else {
            return Err(BoardError::CardNotFound(card.to_string()));
        };
        let proxy = Proxy::of(entry, rect, at.offset_from(offset), &self.config.drag);
        let session = DragSession {
            offset,
            proxy: self.overlay.push(proxy),
            modality,
        };
        entry.presence = Presence::Hidden;
        entry.drag = DragState::Dragging(session);

        self.active = Some(ActiveDrag {
            card: card.clone(),
            modality,
        });
        tracing::debug!(card = %card, ?modality, x = at.x, y = at.y, "drag started");
        Ok(())
    }

    /// Moves the active proxy so the pointer keeps its original offset
    pub fn update_proxy_position(&mut self, at: Point) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let Some(session) = self.board.card(&active.card).and_then(|c| c.session()) else {
            return false;
        };
        let origin = session.proxy_origin(at);
        tracing::trace!(x = origin.x, y = origin.y, "proxy moved");
        self.overlay.move_to(session.proxy, origin)
    }

    /// Drops the active card at `at` and releases the session.
    ///
    /// Returns the notification when the card changed position.
    pub fn finish_drag<G: Geometry + ?Sized>(
        &mut self,
        at: Point,
        geometry: &G,
    ) -> Option<CardMoved> {
        let active = self.active.take()?;
        let card = active.card;

        let relocation = geometry
            .hit_test(&self.board, at)
            .and_then(|node| node.container(&self.board))
            .and_then(|column| {
                let candidates: Vec<(CardId, Rect)> = self
                    .board
                    .column(&column)?
                    .card_ids()
                    .iter()
                    .filter(|id| *id != &card)
                    .filter_map(|id| {
                        geometry
                            .card_rect(&self.board, id)
                            .map(|rect| (id.clone(), rect))
                    })
                    .collect();
                let placement = insertion_placement(at.y, candidates);
                self.board.relocate(&card, &column, placement)
            });

        self.end_session(&card);

        let Some(relocation) = relocation.filter(|r| r.changed()) else {
            tracing::debug!(card = %card, x = at.x, y = at.y, "drag finished without a move");
            return None;
        };
        tracing::debug!(
            card = %card,
            column = %relocation.to.column,
            index = relocation.to.index,
            "card dropped"
        );

        let event = CardMoved {
            column: relocation.to.column,
            card: card.clone(),
            id: Some(card.clone()),
            index: relocation.to.index,
            source: MoveSource::from(active.modality),
        };
        Some(self.emit(event, NodeRef::Card(card)))
    }

    fn is_active(&self, modality: Modality) -> bool {
        self.active
            .as_ref()
            .map(|a| a.modality == modality)
            .unwrap_or(false)
    }

    fn move_active(&mut self, modality: Modality, at: Point) -> bool {
        self.is_active(modality) && self.update_proxy_position(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{DocumentConfig, LayoutConfig},
        domain::{Board, CardSpec, ColumnSpec},
        layout::FlowLayout,
    };
    use std::{cell::RefCell, rc::Rc};

    /// Cards at top 0/48/96... with height 40, columns 250 wide and 400 tall
    fn tight_layout() -> FlowLayout {
        FlowLayout::new(LayoutConfig {
            board_padding: 0.0,
            column_gap: 0.0,
            column_width: 250.0,
            header_height: 0.0,
            zone_padding: 0.0,
            zone_min_height: 400.0,
            card_gap: 8.0,
            card_height: 40.0,
        })
    }

    fn document(config: DocumentConfig) -> Document {
        let mut board = Board::new();
        board.add_column(ColumnSpec::new("todo", "To Do"));
        board.add_column(ColumnSpec::new("done", "Done"));
        board.add_card("todo", CardSpec::new("A").with_id("a"));
        board.add_card("todo", CardSpec::new("B").with_id("b"));
        board.add_card("done", CardSpec::new("X").with_id("x"));
        Document::with_board(board, config)
    }

    fn order(doc: &Document, column: &str) -> Vec<String> {
        doc.board()
            .cards(column)
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }

    fn drop_x_at(y: f64) -> (Document, Option<CardMoved>) {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.pointer_down(&"x".into(), Point::new(260.0, 10.0), &layout)
            .unwrap();
        let moved = doc.pointer_up(Point::new(10.0, y), &layout);
        (doc, moved)
    }

    #[test]
    fn test_insertion_placement_rule() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(0.0, 48.0, 100.0, 40.0);
        let cards = || vec![(CardId::new("a"), a), (CardId::new("b"), b)];

        assert_eq!(insertion_placement(10.0, cards()), Placement::Before("a".into()));
        // a spans 0..40, so its midpoint is 20: y=30 is already past it and
        // the first card still below the drop point is b (midpoint 68)
        assert_eq!(insertion_placement(30.0, cards()), Placement::Before("b".into()));
        assert_eq!(insertion_placement(60.0, cards()), Placement::Before("b".into()));
        assert_eq!(insertion_placement(200.0, cards()), Placement::Append);
        assert_eq!(insertion_placement(0.0, Vec::new()), Placement::Append);
    }

    #[test]
    fn test_drop_above_first_midpoint_inserts_before_it() {
        let (doc, moved) = drop_x_at(10.0);
        assert_eq!(order(&doc, "todo"), vec!["x", "a", "b"]);
        assert_eq!(moved.map(|m| m.index), Some(0));
    }

    #[test]
    fn test_drop_between_midpoints_inserts_before_second() {
        let (doc, _) = drop_x_at(60.0);
        assert_eq!(order(&doc, "todo"), vec!["a", "x", "b"]);
    }

    #[test]
    fn test_drop_below_all_appends() {
        let (doc, moved) = drop_x_at(200.0);
        assert_eq!(order(&doc, "todo"), vec!["a", "b", "x"]);
        assert!(doc.board().cards("done").is_empty());

        let moved = moved.unwrap();
        assert_eq!(moved.column.as_str(), "todo");
        assert_eq!(moved.id, Some("x".into()));
        assert_eq!(moved.index, 2);
        assert_eq!(moved.source, MoveSource::Pointer);
    }

    #[test]
    fn test_start_creates_proxy_and_hides_card() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.pointer_down(&"b".into(), Point::new(20.0, 58.0), &layout)
            .unwrap();

        let card = doc.board().card(&"b".into()).unwrap();
        assert_eq!(card.presence, Presence::Hidden);
        let session = card.session().unwrap();
        assert_eq!(session.offset, Point::new(20.0, 10.0));
        assert_eq!(session.modality, Modality::Pointer);

        let proxy = doc.overlay().get(session.proxy).unwrap();
        assert_eq!(proxy.position, Point::new(0.0, 48.0));
        assert_eq!(proxy.width, 250.0);
        assert!(!proxy.interactive);

        // Still in its slot while dragging
        assert_eq!(order(&doc, "todo"), vec!["a", "b"]);
    }

    #[test]
    fn test_move_only_repositions_proxy() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();

        assert!(doc.pointer_move(Point::new(320.0, 110.0)));
        assert!(!doc.touch_move(&[Point::new(0.0, 0.0)]));

        let proxy = &doc.overlay().proxies()[0];
        assert_eq!(proxy.position, Point::new(300.0, 100.0));
        assert_eq!(order(&doc, "todo"), vec!["a", "b"]);
    }

    #[test]
    fn test_drop_outside_any_column_cleans_up() {
        let layout = FlowLayout::default();
        let mut doc = document(DocumentConfig::default());
        let events = Rc::new(RefCell::new(0));
        let e = events.clone();
        doc.add_listener(NodeRef::Document, move |_| *e.borrow_mut() += 1);

        doc.pointer_down(&"a".into(), Point::new(30.0, 70.0), &layout)
            .unwrap();
        let moved = doc.pointer_up(Point::new(5000.0, 5000.0), &layout);

        assert!(moved.is_none());
        assert_eq!(*events.borrow(), 0);
        assert!(doc.overlay().is_empty());
        assert!(doc.active_drag().is_none());
        let card = doc.board().card(&"a".into()).unwrap();
        assert!(card.is_visible());
        assert!(!card.is_dragging());
        assert_eq!(order(&doc, "todo"), vec!["a", "b"]);
    }

    #[test]
    fn test_drop_in_place_emits_nothing() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        let mut rx = doc.subscribe();

        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();
        // Over its own (hidden) slot: lands before b, where it already is
        let moved = doc.pointer_up(Point::new(20.0, 12.0), &layout);

        assert!(moved.is_none());
        assert!(rx.try_recv().is_err());
        assert!(doc.overlay().is_empty());
    }

    #[test]
    fn test_second_start_is_rejected_by_default() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();
        let offset = doc.board().card(&"a".into()).unwrap().session().unwrap().offset;

        let same = doc.pointer_down(&"a".into(), Point::new(5.0, 5.0), &layout);
        assert!(matches!(same, Err(BoardError::DragInProgress(_))));
        let other = doc.touch_start(&"b".into(), &[Point::new(5.0, 60.0)], &layout);
        assert!(matches!(other, Err(BoardError::DragInProgress(_))));

        let session = doc.board().card(&"a".into()).unwrap().session().unwrap();
        assert_eq!(session.offset, offset);
        assert_eq!(doc.overlay().proxies().len(), 1);
        assert!(!doc.board().card(&"b".into()).unwrap().is_dragging());
    }

    #[test]
    fn test_second_start_preempts_when_configured() {
        let layout = tight_layout();
        let mut config = DocumentConfig::default();
        config.drag.concurrent_start = ConcurrentStart::Preempt;
        let mut doc = document(config);

        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();
        doc.touch_start(&"b".into(), &[Point::new(5.0, 60.0)], &layout)
            .unwrap();

        let a = doc.board().card(&"a".into()).unwrap();
        assert!(a.is_visible());
        assert!(!a.is_dragging());
        assert_eq!(doc.overlay().proxies().len(), 1);
        assert_eq!(
            doc.active_drag().map(|d| (d.card.as_str(), d.modality)),
            Some(("b", Modality::Touch))
        );
    }

    #[test]
    fn test_failed_preempting_start_keeps_running_drag() {
        let layout = tight_layout();
        let mut config = DocumentConfig::default();
        config.drag.concurrent_start = ConcurrentStart::Preempt;
        let mut doc = document(config);

        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();
        // Out of the flow, so the layout has no box for it
        doc.board_mut()
            .card_mut(&"b".into())
            .unwrap()
            .presence = Presence::Removed;

        let err = doc
            .pointer_down(&"b".into(), Point::new(5.0, 60.0), &layout)
            .unwrap_err();
        assert!(matches!(err, BoardError::NoGeometry(_)));

        let a = doc.board().card(&"a".into()).unwrap();
        assert!(a.is_dragging());
        assert_eq!(a.presence, Presence::Hidden);
        assert_eq!(doc.overlay().proxies().len(), 1);
        assert_eq!(
            doc.active_drag().map(|d| d.card.as_str()),
            Some("a")
        );
    }

    #[test]
    fn test_pointer_round_trip_restores_slot() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());

        doc.pointer_down(&"a".into(), Point::new(20.0, 10.0), &layout)
            .unwrap();
        let there = doc.pointer_up(Point::new(260.0, 200.0), &layout).unwrap();
        assert_eq!((there.column.as_str(), there.index), ("done", 1));
        assert_eq!(order(&doc, "todo"), vec!["b"]);

        // a now sits second in "done" (top 48); b is first in "todo" (top 0)
        doc.pointer_down(&"a".into(), Point::new(260.0, 58.0), &layout)
            .unwrap();
        let back = doc.pointer_up(Point::new(10.0, 10.0), &layout).unwrap();

        assert_eq!((back.column.as_str(), back.index), ("todo", 0));
        assert_eq!(order(&doc, "todo"), vec!["a", "b"]);
        assert_eq!(order(&doc, "done"), vec!["x"]);
        assert!(doc.board().card(&"a".into()).unwrap().is_visible());
    }

    #[test]
    fn test_touch_drag_across_columns() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());

        doc.touch_start(&"a".into(), &[Point::new(10.0, 10.0)], &layout)
            .unwrap();
        assert!(doc.touch_move(&[Point::new(260.0, 5.0)]));
        // Pointer release does not end a touch drag
        assert!(doc.pointer_up(Point::new(260.0, 5.0), &layout).is_none());

        let moved = doc
            .touch_end(&[Point::new(260.0, 5.0)], &layout)
            .unwrap();
        assert_eq!(moved.column.as_str(), "done");
        assert_eq!(moved.source, MoveSource::Touch);
        assert_eq!(order(&doc, "done"), vec!["a", "x"]);
        assert_eq!(order(&doc, "todo"), vec!["b"]);
    }

    #[test]
    fn test_touch_end_without_points_cancels() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.touch_start(&"a".into(), &[Point::new(10.0, 10.0)], &layout)
            .unwrap();

        assert!(doc.touch_end(&[], &layout).is_none());
        assert!(doc.active_drag().is_none());
        assert!(doc.overlay().is_empty());
    }

    #[test]
    fn test_touch_start_without_points_is_ignored() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        doc.touch_start(&"a".into(), &[], &layout).unwrap();
        assert!(doc.active_drag().is_none());
    }

    #[test]
    fn test_start_on_unknown_card() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        let err = doc
            .pointer_down(&"ghost".into(), Point::new(0.0, 0.0), &layout)
            .unwrap_err();
        assert!(matches!(err, BoardError::CardNotFound(_)));
        assert!(doc.active_drag().is_none());
    }

    #[test]
    fn test_notification_bubbles_from_card() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        for node in [
            NodeRef::Document,
            NodeRef::Board,
            NodeRef::Column("todo".into()),
            NodeRef::Column("done".into()),
            NodeRef::Card("x".into()),
        ] {
            let seen = seen.clone();
            let name = format!("{:?}", node);
            doc.add_listener(node, move |_| seen.borrow_mut().push(name.clone()));
        }

        doc.pointer_down(&"x".into(), Point::new(260.0, 10.0), &layout)
            .unwrap();
        doc.pointer_up(Point::new(10.0, 200.0), &layout).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                format!("{:?}", NodeRef::Card("x".into())),
                format!("{:?}", NodeRef::Column("todo".into())),
                format!("{:?}", NodeRef::Board),
                format!("{:?}", NodeRef::Document),
            ]
        );
    }

    #[test]
    fn test_identity_is_stable_across_moves() {
        let layout = tight_layout();
        let mut doc = document(DocumentConfig::default());

        for (from, to) in [
            (Point::new(260.0, 10.0), Point::new(10.0, 200.0)),
            (Point::new(10.0, 100.0), Point::new(260.0, 10.0)),
            (Point::new(260.0, 10.0), Point::new(10.0, 5.0)),
        ] {
            let card = match layout.hit_test(doc.board(), from) {
                Some(NodeRef::Card(id)) => id,
                other => panic!("expected a card, got {:?}", other),
            };
            assert_eq!(card.as_str(), "x");
            doc.pointer_down(&card, from, &layout).unwrap();
            let moved = doc.pointer_up(to, &layout).unwrap();
            assert_eq!(moved.card.as_str(), "x");
            assert_eq!(moved.id.as_ref().map(CardId::as_str), Some("x"));
        }
        assert_eq!(order(&doc, "todo"), vec!["x", "a", "b"]);
    }
}
