use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("A drag is already in progress for card {0}")]
    DragInProgress(String),

    #[error("No geometry available for card {0}")]
    NoGeometry(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
