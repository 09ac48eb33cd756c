//! Error types for evtrack.

use thiserror::Error;

use crate::event::EventId;

/// Errors that can occur in evtrack operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

/// Result type alias for evtrack operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
