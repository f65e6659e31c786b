use thiserror::Error;

pub type Result<T> = std::result::Result<T, LanesError>;

#[derive(Debug, Error)]
pub enum LanesError {
    #[error("Unsupported grouping mode: {0}")]
    UnsupportedGroupingMode(String),

    #[error("Unsupported sorting mode: {0}")]
    UnsupportedSortingMode(String),

    #[error("Invalid priority {priority} on ticket {ticket}")]
    InvalidPriority { ticket: String, priority: i64 },

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Invalid destination column: {0}")]
    InvalidDestination(String),

    #[error("Move does not change the ticket")]
    NoChange,

    #[error("Invalid ticket ID format: {0}")]
    InvalidTicketId(String),

    #[error("Invalid user ID format: {0}")]
    InvalidUserId(String),

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
