//! # Rope Domain Types
//!
//! Ropes, their inspection and fall logs, and the derived safety status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{RopeError, RopeResult};

/// Opaque rope identity, printed on the NFC tag attached to the rope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RopeId(String);

impl RopeId {
    /// Parse an externally supplied id (URL segment, CLI flag).
    pub fn parse(raw: &str) -> RopeResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RopeError::Validation("rope id must not be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn from_generated(code: String) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered rope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rope {
    pub id: RopeId,
    pub product_name: String,
    pub thickness_mm: f64,
    pub length_m: f64,
    pub color: String,
    pub batch: String,
    pub manufacturing_date: NaiveDate,
    pub purchase_date: NaiveDate,

    /// Argon2id hash of the customer password (never plaintext, never exposed)
    #[serde(skip_serializing, default)]
    pub customer_password_hash: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Admin input for registering a rope
#[derive(Debug, Clone, Deserialize)]
pub struct NewRope {
    pub product_name: String,
    pub thickness_mm: f64,
    pub length_m: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub batch: String,
    pub manufacturing_date: NaiveDate,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub customer_password: Option<String>,
}

impl NewRope {
    /// Check the registration fields against `today`
    pub fn validate(&self, today: NaiveDate) -> RopeResult<()> {
        if self.product_name.trim().is_empty() {
            return Err(RopeError::Validation("product name must not be empty".to_string()));
        }
        if self.thickness_mm.is_nan() || self.thickness_mm <= 0.0 {
            return Err(RopeError::Validation("thickness must be positive".to_string()));
        }
        if self.length_m.is_nan() || self.length_m <= 0.0 {
            return Err(RopeError::Validation("length must be positive".to_string()));
        }
        if self.manufacturing_date > self.purchase_date {
            return Err(RopeError::Validation(
                "manufacturing date must not be after purchase date".to_string(),
            ));
        }
        if self.purchase_date > today {
            return Err(RopeError::FutureDate {
                date: self.purchase_date,
                today,
            });
        }
        Ok(())
    }
}

/// Severity of a logged fall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallSeverity {
    /// Forces DAMAGED on its own
    Major,
    /// Two or more since baseline force DAMAGED
    Minor,
}

impl FallSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallSeverity::Major => "major",
            FallSeverity::Minor => "minor",
        }
    }
}

impl FromStr for FallSeverity {
    type Err = RopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(FallSeverity::Major),
            "minor" => Ok(FallSeverity::Minor),
            other => Err(RopeError::Validation(format!(
                "unknown fall severity '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FallSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a rope's inspection log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub id: i64,
    pub rope_id: RopeId,
    pub inspection_date: NaiveDate,
    pub comment: Option<String>,
}

/// Admin input for logging an inspection
#[derive(Debug, Clone, Deserialize)]
pub struct NewInspection {
    pub inspection_date: NaiveDate,
    #[serde(default)]
    pub comment: Option<String>,
}

/// One row of a rope's fall log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallRecord {
    pub id: i64,
    pub rope_id: RopeId,
    pub fall_date: NaiveDate,
    pub severity: FallSeverity,
    pub comment: Option<String>,
}

/// Admin input for logging a fall
#[derive(Debug, Clone, Deserialize)]
pub struct NewFall {
    pub fall_date: NaiveDate,
    pub severity: FallSeverity,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Derived safety status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RopeStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "INSPECTION DUE")]
    InspectionDue,
    #[serde(rename = "DAMAGED")]
    Damaged,
}

impl RopeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RopeStatus::Active => "ACTIVE",
            RopeStatus::InspectionDue => "INSPECTION DUE",
            RopeStatus::Damaged => "DAMAGED",
        }
    }
}

impl fmt::Display for RopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
