//! Geometry seen by the drag engine.
//!
//! The engine never measures anything itself: the host answers "where is
//! this card" and "what is under this point" through [`Geometry`].
//! [`FlowLayout`] is a ready-made answer for the stock board layout.

pub mod flow;

use crate::domain::{Board, CardId, NodeRef};
use serde::{Deserialize, Serialize};

pub use flow::FlowLayout;

/// A position in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned bounding box in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn vertical_midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }
}

/// Layout queries the host answers for the engine
pub trait Geometry {
    /// Current on-screen box of a card, if it is laid out
    fn card_rect(&self, board: &Board, card: &CardId) -> Option<Rect>;

    /// Topmost interactive node under a point.
    ///
    /// Proxies and cards whose presence is not `Visible` must not be
    /// reported, matching how a renderer skips invisible and
    /// pointer-transparent content.
    fn hit_test(&self, board: &Board, point: Point) -> Option<NodeRef>;
}
