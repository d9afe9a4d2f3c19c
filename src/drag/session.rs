use crate::{domain::CardId, drag::proxy::ProxyId, layout::Point};
use serde::{Deserialize, Serialize};

/// Input device that started a tracked drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Pointer,
    Touch,
}

/// Ephemeral state of a card being dragged
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Distance from the pointer to the card's top-left corner at drag start
    pub offset: Point,
    pub proxy: ProxyId,
    pub modality: Modality,
}

impl DragSession {
    /// Where the proxy's top-left corner goes for a pointer position
    pub fn proxy_origin(&self, pointer: Point) -> Point {
        pointer.offset_from(self.offset)
    }
}

/// The single document-wide drag slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub card: CardId,
    pub modality: Modality,
}

/// Why a drag ended without a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancelReason {
    Escape,
    FocusLost,
    VisibilityChange,
    PointerLeftWindow,
    /// The release event carried no position
    InputLost,
    /// Another drag took over the slot
    Preempted,
    /// The card was removed from the board
    Detached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_origin_subtracts_offset() {
        let session = DragSession {
            offset: Point::new(5.0, 10.0),
            proxy: ProxyId::new(),
            modality: Modality::Pointer,
        };
        assert_eq!(
            session.proxy_origin(Point::new(100.0, 50.0)),
            Point::new(95.0, 40.0)
        );
    }
}
