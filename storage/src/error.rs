//! Storage error types.
//!
//! Used by store implementations and callers of storage APIs. Converts into
//! [`crewbot_core::CrewbotError::Persistence`] so handlers can use `?`.

use crewbot_core::CrewbotError;
use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

impl From<StorageError> for CrewbotError {
    fn from(e: StorageError) -> Self {
        CrewbotError::Persistence(e.to_string())
    }
}
