//! Observability for ropelog
//!
//! Structured JSON logs via `tracing`. Domain events are logged where they
//! happen (`ROPE_REGISTERED`, `INSPECTION_LOGGED`, `FALL_LOGGED`,
//! `ADMIN_AUTH_REJECTED`, `PERSISTENCE_FAILURE`, `SERVER_STARTED`).

pub mod logger;

pub use logger::{init_logging, DEFAULT_FILTER};
