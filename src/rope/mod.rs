//! # Rope Module
//!
//! Rope registration, the append-only inspection and fall logs, and the
//! status engine that turns them into ACTIVE / INSPECTION DUE / DAMAGED.

pub mod clock;
pub mod errors;
pub mod id;
pub mod service;
pub mod status;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{RopeError, RopeResult};
pub use id::generate_rope_id;
pub use service::{RopeOverview, RopeService, RopeSummary};
pub use status::{derive_status, StatusReport};
pub use types::{
    FallRecord, FallSeverity, InspectionRecord, NewFall, NewInspection, NewRope, Rope, RopeId,
    RopeStatus,
};
