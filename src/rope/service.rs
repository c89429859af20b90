//! # Rope Service
//!
//! Entry point for the HTTP layer and CLI: registration, inspection and
//! fall logging, status computation and the public rope overview.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::clock::Clock;
use super::errors::{RopeError, RopeResult};
use super::id::generate_rope_id;
use super::status::{baseline_date, derive_status, StatusReport};
use super::types::{
    FallRecord, InspectionRecord, NewFall, NewInspection, NewRope, Rope, RopeId, RopeStatus,
};
use crate::auth::crypto::hash_customer_password;
use crate::store::{RopeStore, StoreError};

/// Everything the public rope page shows
#[derive(Debug, Clone, Serialize)]
pub struct RopeOverview {
    #[serde(flatten)]
    pub rope: Rope,
    #[serde(flatten)]
    pub report: StatusReport,
    pub inspections: Vec<InspectionRecord>,
    pub falls: Vec<FallRecord>,
}

/// One line of the admin rope listing
#[derive(Debug, Clone, Serialize)]
pub struct RopeSummary {
    pub id: RopeId,
    pub product_name: String,
    pub purchase_date: NaiveDate,
    pub status: RopeStatus,
}

/// Rope service over a store and a clock
pub struct RopeService<S: RopeStore, C: Clock> {
    store: S,
    clock: C,
}

/// Blank comments are stored as absent
fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

impl<S: RopeStore, C: Clock> RopeService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ==================
    // Registration
    // ==================

    /// Register a new rope under a freshly generated id
    ///
    /// An id collision is reported as `IdCollision` and not retried here.
    pub fn register_rope(&self, input: NewRope) -> RopeResult<Rope> {
        input.validate(self.today())?;

        let customer_password_hash = match input.customer_password.as_deref() {
            Some(password) if !password.is_empty() => Some(
                hash_customer_password(password).map_err(|e| RopeError::Internal(e.to_string()))?,
            ),
            _ => None,
        };

        let rope = Rope {
            id: generate_rope_id(),
            product_name: input.product_name.trim().to_string(),
            thickness_mm: input.thickness_mm,
            length_m: input.length_m,
            color: input.color.trim().to_string(),
            batch: input.batch.trim().to_string(),
            manufacturing_date: input.manufacturing_date,
            purchase_date: input.purchase_date,
            customer_password_hash,
            created_at: Utc::now(),
        };

        match self.store.insert_rope(&rope) {
            Ok(()) => {
                info!(
                    event = "ROPE_REGISTERED",
                    rope_id = %rope.id,
                    product = %rope.product_name,
                    "rope registered"
                );
                Ok(rope)
            }
            Err(StoreError::UniqueViolation(_)) => {
                warn!(event = "ROPE_ID_COLLISION", rope_id = %rope.id, "generated id already taken");
                Err(RopeError::IdCollision(rope.id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ==================
    // Event Logs
    // ==================

    /// Append an inspection record
    ///
    /// Duplicate dates are caught by the store's uniqueness constraint.
    pub fn log_inspection(
        &self,
        rope_id: &RopeId,
        input: NewInspection,
    ) -> RopeResult<InspectionRecord> {
        self.reject_future(input.inspection_date)?;

        let input = NewInspection {
            comment: normalize_comment(input.comment),
            ..input
        };

        match self.store.insert_inspection(rope_id, &input) {
            Ok(record) => {
                info!(
                    event = "INSPECTION_LOGGED",
                    rope_id = %rope_id,
                    date = %record.inspection_date,
                    "inspection logged"
                );
                Ok(record)
            }
            Err(StoreError::UniqueViolation(_)) => Err(RopeError::DuplicateInspection {
                rope_id: rope_id.to_string(),
                date: input.inspection_date,
            }),
            Err(StoreError::MissingRope) => Err(RopeError::NotFound(rope_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Append a fall record
    pub fn log_fall(&self, rope_id: &RopeId, input: NewFall) -> RopeResult<FallRecord> {
        self.reject_future(input.fall_date)?;

        let input = NewFall {
            comment: normalize_comment(input.comment),
            ..input
        };

        match self.store.insert_fall(rope_id, &input) {
            Ok(record) => {
                info!(
                    event = "FALL_LOGGED",
                    rope_id = %rope_id,
                    date = %record.fall_date,
                    severity = %record.severity,
                    "fall logged"
                );
                Ok(record)
            }
            Err(StoreError::MissingRope) => Err(RopeError::NotFound(rope_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn reject_future(&self, date: NaiveDate) -> RopeResult<()> {
        let today = self.today();
        if date > today {
            return Err(RopeError::FutureDate { date, today });
        }
        Ok(())
    }

    // ==================
    // Status
    // ==================

    /// Compute the status of a rope known to exist
    ///
    /// Two store round trips: latest inspection date, then falls since the
    /// baseline. A store failure in either is returned, never masked.
    pub fn compute_status(
        &self,
        rope_id: &RopeId,
        purchase_date: NaiveDate,
    ) -> RopeResult<StatusReport> {
        let latest = self.store.latest_inspection_date(rope_id)?;
        let baseline = baseline_date(purchase_date, latest);
        let falls = self.store.falls_since(rope_id, baseline)?;

        Ok(derive_status(purchase_date, latest, &falls, self.today()))
    }

    /// Look up a rope and compute its status
    pub fn status_of(&self, rope_id: &RopeId) -> RopeResult<StatusReport> {
        let rope = self.require_rope(rope_id)?;
        self.compute_status(&rope.id, rope.purchase_date)
    }

    // ==================
    // Queries
    // ==================

    /// Rope attributes, status and full history
    pub fn overview(&self, rope_id: &RopeId) -> RopeResult<RopeOverview> {
        let rope = self.require_rope(rope_id)?;
        let report = self.compute_status(&rope.id, rope.purchase_date)?;
        let inspections = self.store.inspections_for(&rope.id)?;
        let falls = self.store.falls_for(&rope.id)?;

        Ok(RopeOverview {
            rope,
            report,
            inspections,
            falls,
        })
    }

    /// Every registered rope with its current status
    pub fn list_ropes(&self) -> RopeResult<Vec<RopeSummary>> {
        self.store
            .list_ropes()?
            .into_iter()
            .map(|rope| {
                let report = self.compute_status(&rope.id, rope.purchase_date)?;
                Ok(RopeSummary {
                    id: rope.id,
                    product_name: rope.product_name,
                    purchase_date: rope.purchase_date,
                    status: report.status,
                })
            })
            .collect()
    }

    fn require_rope(&self, rope_id: &RopeId) -> RopeResult<Rope> {
        self.store
            .find_rope(rope_id)?
            .ok_or_else(|| RopeError::NotFound(rope_id.to_string()))
    }
}
