//! Error types for the slambook service.

use thiserror::Error;

/// Result type alias using the slambook Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for slambook operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Client-fixable input problem (missing, empty, or too-long field)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// PIN verification failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Uniqueness violation at insert time (slug collision)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Attachment could not be stored by the media backend
    #[error("Media upload error: {0}")]
    MediaUpload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("Serialization error: {}", e))
    }
}
