//! Storage-specific errors

use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Failure injected by a test double
    #[error("Injected failure: {0}")]
    Injected(&'static str),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for encore_core::EncoreError {
    fn from(err: StorageError) -> Self {
        encore_core::EncoreError::storage(err.to_string())
    }
}
