//! # Rope Store
//!
//! Persistence for ropes and their inspection / fall logs.
//!
//! ## Tables
//!
//! - `ropes` - Registration record, keyed by rope id
//! - `inspection_logs` - One row per (rope, date); UNIQUE enforced by the store
//! - `fall_logs` - Append-only, severity `major` or `minor`

pub mod errors;
pub mod memory;
pub mod schema;
pub mod sqlite;

use chrono::NaiveDate;

use crate::rope::types::{FallRecord, InspectionRecord, NewFall, NewInspection, Rope, RopeId};

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryRopeStore;
pub use sqlite::SqliteRopeStore;

/// Rope store trait
///
/// Abstracts storage operations for ropes and their logs. Every method is a
/// single round trip; uniqueness is enforced here, not by callers.
pub trait RopeStore: Send + Sync {
    /// Register a rope. A taken id yields `UniqueViolation`.
    fn insert_rope(&self, rope: &Rope) -> StoreResult<()>;

    /// Find a rope by id
    fn find_rope(&self, id: &RopeId) -> StoreResult<Option<Rope>>;

    /// All ropes, oldest registration first
    fn list_ropes(&self) -> StoreResult<Vec<Rope>>;

    /// Latest inspection date for a rope, if it was ever inspected
    fn latest_inspection_date(&self, id: &RopeId) -> StoreResult<Option<NaiveDate>>;

    /// Falls with `fall_date >= since`, newest first
    fn falls_since(&self, id: &RopeId, since: NaiveDate) -> StoreResult<Vec<FallRecord>>;

    /// Append an inspection. A second row for the same date yields `UniqueViolation`.
    fn insert_inspection(
        &self,
        id: &RopeId,
        inspection: &NewInspection,
    ) -> StoreResult<InspectionRecord>;

    /// Append a fall
    fn insert_fall(&self, id: &RopeId, fall: &NewFall) -> StoreResult<FallRecord>;

    /// Full inspection history, newest first
    fn inspections_for(&self, id: &RopeId) -> StoreResult<Vec<InspectionRecord>>;

    /// Full fall history, newest first
    fn falls_for(&self, id: &RopeId) -> StoreResult<Vec<FallRecord>>;
}

impl<T: RopeStore + ?Sized> RopeStore for Box<T> {
    fn insert_rope(&self, rope: &Rope) -> StoreResult<()> {
        (**self).insert_rope(rope)
    }

    fn find_rope(&self, id: &RopeId) -> StoreResult<Option<Rope>> {
        (**self).find_rope(id)
    }

    fn list_ropes(&self) -> StoreResult<Vec<Rope>> {
        (**self).list_ropes()
    }

    fn latest_inspection_date(&self, id: &RopeId) -> StoreResult<Option<NaiveDate>> {
        (**self).latest_inspection_date(id)
    }

    fn falls_since(&self, id: &RopeId, since: NaiveDate) -> StoreResult<Vec<FallRecord>> {
        (**self).falls_since(id, since)
    }

    fn insert_inspection(
        &self,
        id: &RopeId,
        inspection: &NewInspection,
    ) -> StoreResult<InspectionRecord> {
        (**self).insert_inspection(id, inspection)
    }

    fn insert_fall(&self, id: &RopeId, fall: &NewFall) -> StoreResult<FallRecord> {
        (**self).insert_fall(id, fall)
    }

    fn inspections_for(&self, id: &RopeId) -> StoreResult<Vec<InspectionRecord>> {
        (**self).inspections_for(id)
    }

    fn falls_for(&self, id: &RopeId) -> StoreResult<Vec<FallRecord>> {
        (**self).falls_for(id)
    }
}
