use crate::{
    config::LayoutConfig,
    domain::{Board, CardId, Column, NodeRef, Presence},
    layout::{Geometry, Point, Rect},
};

/// Stock board layout: fixed-width columns side by side, each with a header
/// above a drop zone of vertically stacked cards. Columns stretch to the
/// tallest one.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    config: LayoutConfig,
}

impl FlowLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn zone_height(&self, column: &Column, board: &Board) -> f64 {
        let c = &self.config;
        let stacked = column
            .card_ids()
            .iter()
            .filter(|id| in_flow(board, id))
            .count();
        let content = if stacked == 0 {
            0.0
        } else {
            stacked as f64 * c.card_height + (stacked - 1) as f64 * c.card_gap
        };
        (content + 2.0 * c.zone_padding).max(c.zone_min_height)
    }

    fn column_height(&self, board: &Board) -> f64 {
        let tallest = board
            .columns()
            .iter()
            .map(|col| self.zone_height(col, board))
            .fold(self.config.zone_min_height, f64::max);
        self.config.header_height + tallest
    }

    /// Bounding box of the board itself
    pub fn board_rect(&self, board: &Board) -> Rect {
        let c = &self.config;
        let n = board.columns().len();
        let columns_width = if n == 0 {
            0.0
        } else {
            n as f64 * c.column_width + (n - 1) as f64 * c.column_gap
        };
        let height = if n == 0 { 0.0 } else { self.column_height(board) };
        Rect::new(
            0.0,
            0.0,
            columns_width + 2.0 * c.board_padding,
            height + 2.0 * c.board_padding,
        )
    }

    /// Bounding box of the column at `index` in board order
    pub fn column_rect(&self, board: &Board, index: usize) -> Option<Rect> {
        if index >= board.columns().len() {
            return None;
        }
        let c = &self.config;
        Some(Rect::new(
            c.board_padding + index as f64 * (c.column_width + c.column_gap),
            c.board_padding,
            c.column_width,
            self.column_height(board),
        ))
    }

    /// Bounding box of the card-holding region of a column
    pub fn zone_rect(&self, board: &Board, index: usize) -> Option<Rect> {
        let column = self.column_rect(board, index)?;
        let header = self.config.header_height;
        Some(Rect::new(
            column.left,
            column.top + header,
            column.width,
            column.height - header,
        ))
    }
}

fn in_flow(board: &Board, id: &CardId) -> bool {
    board
        .card(id)
        .map(|card| card.presence != Presence::Removed)
        .unwrap_or(false)
}

impl Geometry for FlowLayout {
    fn card_rect(&self, board: &Board, card: &CardId) -> Option<Rect> {
        if !in_flow(board, card) {
            return None;
        }
        let column_id = board.column_of(card)?;
        let index = board.columns().iter().position(|c| &c.id == column_id)?;
        let zone = self.zone_rect(board, index)?;
        let c = &self.config;

        let position = board.columns()[index]
            .card_ids()
            .iter()
            .filter(|id| in_flow(board, id))
            .position(|id| id == card)?;

        Some(Rect::new(
            zone.left + c.zone_padding,
            zone.top + c.zone_padding + position as f64 * (c.card_height + c.card_gap),
            c.column_width - 2.0 * c.zone_padding,
            c.card_height,
        ))
    }

    fn hit_test(&self, board: &Board, point: Point) -> Option<NodeRef> {
        for (index, column) in board.columns().iter().enumerate() {
            let Some(rect) = self.column_rect(board, index) else {
                continue;
            };
            if !rect.contains(point) {
                continue;
            }

            let hit_card = column.card_ids().iter().find(|id| {
                board.card(id).map(|c| c.is_visible()).unwrap_or(false)
                    && self
                        .card_rect(board, id)
                        .map(|r| r.contains(point))
                        .unwrap_or(false)
            });
            if let Some(card) = hit_card {
                return Some(NodeRef::Card(card.clone()));
            }

            let in_zone = self
                .zone_rect(board, index)
                .map(|zone| zone.contains(point))
                .unwrap_or(false);
            return Some(if in_zone {
                NodeRef::DropZone(column.id.clone())
            } else {
                NodeRef::Column(column.id.clone())
            });
        }

        if self.board_rect(board).contains(point) {
            Some(NodeRef::Board)
        } else {
            Some(NodeRef::Document)
        }
    }
}
