//! Persistence errors

use thiserror::Error;

use fraudwatch_engine::StoreError;

/// SQLite persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid decimal value in column {column}: {value}")]
    InvalidDecimal { column: String, value: String },

    #[error("invalid uuid in column {column}: {value}")]
    InvalidUuid { column: String, value: String },

    #[error("invalid status value: {0}")]
    InvalidStatus(String),
}

/// Result type alias for the persistence layer
pub type StorageResult<T> = Result<T, StorageError>;

// Engine traits speak StoreError; everything here degrades to a backend
// error string at that boundary.
impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Backend(err.to_string())
    }
}
