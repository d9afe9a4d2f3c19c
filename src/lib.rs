//! # Kanban Reorder
//!
//! Headless drag-and-reorder engine for kanban boards.
//!
//! A [`Document`] owns a [`Board`] of columns holding ordered cards. Hosts
//! feed it pointer, touch, keyboard and native drag events, answer layout
//! questions through [`Geometry`], render the proxies it keeps in its
//! overlay, and observe [`CardMoved`] notifications.
//!
//! ```
//! use kanban_reorder::{CardSpec, ColumnSpec, Document, DocumentConfig, FlowLayout, Point};
//!
//! let mut doc = Document::new(DocumentConfig::default());
//! doc.board_mut().add_column(ColumnSpec::new("todo", "To Do"));
//! doc.board_mut().add_column(ColumnSpec::new("done", "Done"));
//! let card = doc.board_mut().add_card("todo", CardSpec::new("Write docs")).unwrap();
//!
//! let layout = FlowLayout::default();
//! doc.pointer_down(&card, Point::new(30.0, 70.0), &layout).unwrap();
//! doc.pointer_move(Point::new(300.0, 80.0));
//! let moved = doc.pointer_up(Point::new(300.0, 80.0), &layout).unwrap();
//!
//! assert_eq!(moved.column.as_str(), "done");
//! assert_eq!(moved.id, Some(card));
//! ```

pub mod config;
pub mod document;
pub mod domain;
pub mod drag;
pub mod error;
pub mod events;
pub mod layout;

// Re-export commonly used types
pub use config::{ConcurrentStart, DocumentConfig, DragConfig, LayoutConfig};
pub use document::Document;
pub use domain::{
    board::{Board, Placement, Relocation, Slot},
    card::{Card, CardId, CardSpec, Presence},
    column::{Column, ColumnId, ColumnSpec},
    node::NodeRef,
};
pub use drag::{CancelReason, DataTransfer, Key, Modality, TransferItem};
pub use error::{BoardError, Result};
pub use events::{CardMoved, ListenerId, MoveSource};
pub use layout::{FlowLayout, Geometry, Point, Rect};
