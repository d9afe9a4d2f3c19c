pub mod board;
pub mod card;
pub mod card_list;
pub mod column;
pub mod node;

pub use board::{Board, Placement, Relocation, Slot};
pub use card::{Card, CardId, CardSpec, DragState, Presence};
pub use card_list::CardList;
pub use column::{Column, ColumnId, ColumnSpec};
pub use node::NodeRef;
