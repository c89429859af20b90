//! # Rope Errors
//!
//! Error taxonomy for rope registration, logging and status lookups.
//!
//! NotFound and validation failures are user-facing and never retried.
//! Persistence failures are server faults whose detail stays in the logs.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for rope operations
pub type RopeResult<T> = Result<T, RopeError>;

/// Rope domain errors
#[derive(Debug, Clone, Error)]
pub enum RopeError {
    // ==================
    // Lookup Errors
    // ==================

    /// No rope registered under this id
    #[error("Rope not found: {0}")]
    NotFound(String),

    // ==================
    // Validation Errors
    // ==================

    /// Submitted date lies after today
    #[error("Date {date} is in the future (today is {today})")]
    FutureDate { date: NaiveDate, today: NaiveDate },

    /// An inspection is already logged for this rope on this date
    #[error("Rope {rope_id} already has an inspection on {date}")]
    DuplicateInspection { rope_id: String, date: NaiveDate },

    /// Malformed input
    #[error("Invalid input: {0}")]
    Validation(String),

    // ==================
    // Conflict Errors
    // ==================

    /// Freshly generated rope id already taken; the request may be repeated
    #[error("Generated rope id collided with an existing rope, please retry")]
    IdCollision(String),

    // ==================
    // Internal Errors
    // ==================

    /// Datastore unreachable or query failed
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Any other server-side fault (e.g. password hashing)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RopeError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            RopeError::FutureDate { .. } => 400,
            RopeError::Validation(_) => 400,

            // 404 Not Found
            RopeError::NotFound(_) => 404,

            // 409 Conflict
            RopeError::DuplicateInspection { .. } => 409,
            RopeError::IdCollision(_) => 409,

            // 500 Internal Server Error
            RopeError::Persistence(_) => 500,
            RopeError::Internal(_) => 500,
        }
    }

    /// Returns whether the caller can correct or repeat the request
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Returns whether repeating the identical request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, RopeError::IdCollision(_))
    }

    /// Message safe to hand to an HTTP client
    pub fn public_message(&self) -> String {
        match self {
            RopeError::Persistence(_) | RopeError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for RopeError {
    fn from(err: StoreError) -> Self {
        RopeError::Persistence(err.to_string())
    }
}
