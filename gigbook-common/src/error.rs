//! Common error types for gigbook

use thiserror::Error;

/// Common result type for gigbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy of the booking core
#[derive(Error, Debug)]
pub enum Error {
    /// Required field missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Transaction failure (constraint violation, connection loss, ...)
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Stored JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    /// True for errors caused by the caller's input rather than the store
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound { .. })
    }
}
