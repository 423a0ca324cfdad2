//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted text failed to parse, or a record failed to serialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error from a file-backed storage slot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage backend rejected the operation.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
