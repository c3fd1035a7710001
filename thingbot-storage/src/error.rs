//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored document was written by an incompatible format version.
    #[error("unsupported store format version: {0}")]
    UnsupportedFormat(String),
}

impl From<tempfile::PersistError> for StorageError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
