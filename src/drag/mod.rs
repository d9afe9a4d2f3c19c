pub mod keyboard;
pub mod native;
pub mod pointer;
pub mod proxy;
pub mod session;

pub use keyboard::Key;
pub use native::{DataTransfer, TransferItem};
pub use pointer::insertion_placement;
pub use proxy::{Overlay, Proxy, ProxyId};
pub use session::{ActiveDrag, CancelReason, DragSession, Modality};
