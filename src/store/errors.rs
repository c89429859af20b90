//! # Store Errors
//!
//! Constraint violations are surfaced as their own variants so the service
//! layer can turn them into domain outcomes; everything else is a backend
//! failure.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A log row referenced a rope that does not exist
    #[error("Referenced rope does not exist")]
    MissingRope,

    /// Query, connection or schema failure
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Connection lock poisoned by a panicking holder
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            match failure.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return StoreError::UniqueViolation(message.clone().unwrap_or_default());
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return StoreError::MissingRope,
                _ => {}
            }
        }
        StoreError::Backend(err.to_string())
    }
}
