use crate::domain::{board::Board, card::CardId, column::ColumnId};
use serde::{Deserialize, Serialize};

/// A node of the rendered board tree.
///
/// Used both as the result of hit testing and as the place a notification
/// listener is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "kebab-case")]
pub enum NodeRef {
    Document,
    Board,
    Column(ColumnId),
    /// The card-holding region of a column
    DropZone(ColumnId),
    Card(CardId),
}

impl NodeRef {
    /// The card-acceptant container enclosing this node, if any.
    ///
    /// A card resolves to the column holding it, a column or drop zone to
    /// itself; the board and the document hold no cards directly.
    pub fn container(&self, board: &Board) -> Option<ColumnId> {
        match self {
            Self::Column(id) | Self::DropZone(id) => board
                .column(id)
                .filter(|c| c.accepts_cards())
                .map(|c| c.id.clone()),
            Self::Card(id) => board.column_of(id).cloned(),
            Self::Board | Self::Document => None,
        }
    }

    /// Parent of this node in the board tree
    pub fn parent(&self, board: &Board) -> Option<NodeRef> {
        match self {
            Self::Card(id) => board.column_of(id).cloned().map(Self::DropZone),
            Self::DropZone(id) => Some(Self::Column(id.clone())),
            Self::Column(_) => Some(Self::Board),
            Self::Board => Some(Self::Document),
            Self::Document => None,
        }
    }

    /// This node followed by all of its ancestors, innermost first
    pub fn path(&self, board: &Board) -> Vec<NodeRef> {
        let mut path = vec![self.clone()];
        let mut current = self.parent(board);
        while let Some(node) = current {
            current = node.parent(board);
            path.push(node);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{card::CardSpec, column::ColumnSpec};

    fn board() -> Board {
        let mut board = Board::new();
        board.add_column(ColumnSpec::new("todo", "To Do"));
        board.add_card("todo", CardSpec::new("A").with_id("a"));
        board
    }

    #[test]
    fn test_container_resolution() {
        let board = board();
        let todo = ColumnId::new("todo");

        assert_eq!(NodeRef::Card("a".into()).container(&board), Some(todo.clone()));
        assert_eq!(NodeRef::Column(todo.clone()).container(&board), Some(todo.clone()));
        assert_eq!(NodeRef::DropZone(todo).container(&board), Some("todo".into()));
        assert_eq!(NodeRef::Board.container(&board), None);
        assert_eq!(NodeRef::Document.container(&board), None);
        assert_eq!(NodeRef::Column("ghost".into()).container(&board), None);
        assert_eq!(NodeRef::Card("ghost".into()).container(&board), None);
    }

    #[test]
    fn test_path_from_card() {
        let board = board();
        let path = NodeRef::Card("a".into()).path(&board);

        assert_eq!(
            path,
            vec![
                NodeRef::Card("a".into()),
                NodeRef::DropZone("todo".into()),
                NodeRef::Column("todo".into()),
                NodeRef::Board,
                NodeRef::Document,
            ]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&NodeRef::Column("todo".into())).unwrap();
        assert_eq!(json, r#"{"kind":"column","id":"todo"}"#);
    }
}
