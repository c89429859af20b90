//! # Status Engine
//!
//! Derives a rope's safety status from its purchase date, latest inspection
//! and the falls logged since the baseline.
//!
//! ## Rules (first match wins)
//! 1. Any major fall on or after the baseline: DAMAGED
//! 2. Two or more minor falls on or after the baseline: DAMAGED
//! 3. Today later than baseline + 365 days: INSPECTION DUE
//! 4. Otherwise: ACTIVE
//!
//! The baseline is the latest inspection date, or the purchase date when
//! the rope was never inspected. A new inspection therefore clears earlier
//! falls from the count.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::types::{FallRecord, FallSeverity, RopeStatus};

/// Days after the baseline before an inspection falls due
pub const INSPECTION_WINDOW_DAYS: i64 = 365;

/// Minor falls since baseline that count as damage
pub const MINOR_FALLS_DAMAGE_THRESHOLD: usize = 2;

/// Outcome of a status derivation, with the figures it was based on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub status: RopeStatus,
    pub baseline_date: NaiveDate,
    pub next_inspection_due: NaiveDate,
    pub major_falls: usize,
    pub minor_falls: usize,
}

/// Baseline date: latest inspection, else purchase date
pub fn baseline_date(purchase_date: NaiveDate, latest_inspection: Option<NaiveDate>) -> NaiveDate {
    latest_inspection.unwrap_or(purchase_date)
}

/// Derive the status from already-fetched rows.
///
/// Falls dated before the baseline are ignored, so callers may pass a
/// superset of the rows the store returned.
pub fn derive_status(
    purchase_date: NaiveDate,
    latest_inspection: Option<NaiveDate>,
    falls: &[FallRecord],
    today: NaiveDate,
) -> StatusReport {
    let baseline = baseline_date(purchase_date, latest_inspection);
    let next_due = baseline + Duration::days(INSPECTION_WINDOW_DAYS);

    let counted = falls.iter().filter(|f| f.fall_date >= baseline);
    let (major_falls, minor_falls) =
        counted.fold((0usize, 0usize), |(major, minor), fall| match fall.severity {
            FallSeverity::Major => (major + 1, minor),
            FallSeverity::Minor => (major, minor + 1),
        });

    let status = if major_falls >= 1 || minor_falls >= MINOR_FALLS_DAMAGE_THRESHOLD {
        RopeStatus::Damaged
    } else if today > next_due {
        RopeStatus::InspectionDue
    } else {
        RopeStatus::Active
    };

    StatusReport {
        status,
        baseline_date: baseline,
        next_inspection_due: next_due,
        major_falls,
        minor_falls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rope::types::RopeId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fall(on: NaiveDate, severity: FallSeverity) -> FallRecord {
        FallRecord {
            id: 0,
            rope_id: RopeId::parse("TESTROPE01").unwrap(),
            fall_date: on,
            severity,
            comment: None,
        }
    }

    #[test]
    fn test_unused_rope_active_within_window() {
        let purchase = date(2023, 1, 1);
        let report = derive_status(purchase, None, &[], date(2024, 1, 1));
        assert_eq!(report.status, RopeStatus::Active);
        assert_eq!(report.baseline_date, purchase);
        assert_eq!(report.next_inspection_due, date(2024, 1, 1));
    }

    #[test]
    fn test_never_inspected_rope_due_after_366_days() {
        let report = derive_status(date(2023, 1, 1), None, &[], date(2024, 1, 2));
        assert_eq!(report.status, RopeStatus::InspectionDue);
    }

    #[test]
    fn test_inspection_resets_baseline() {
        let report = derive_status(
            date(2023, 1, 1),
            Some(date(2024, 6, 1)),
            &[],
            date(2024, 6, 2),
        );
        assert_eq!(report.status, RopeStatus::Active);
        assert_eq!(report.next_inspection_due, date(2025, 6, 1));
    }

    #[test]
    fn test_single_major_fall_damages() {
        let falls = [fall(date(2024, 2, 1), FallSeverity::Major)];
        let report = derive_status(date(2024, 1, 1), None, &falls, date(2024, 2, 2));
        assert_eq!(report.status, RopeStatus::Damaged);
        assert_eq!(report.major_falls, 1);
    }

    #[test]
    fn test_damage_overrides_overdue_inspection() {
        let falls = [fall(date(2024, 2, 1), FallSeverity::Major)];
        let report = derive_status(date(2024, 1, 1), None, &falls, date(2026, 1, 1));
        assert_eq!(report.status, RopeStatus::Damaged);
    }

    #[test]
    fn test_one_minor_fall_is_not_damage() {
        let falls = [fall(date(2024, 2, 1), FallSeverity::Minor)];
        let report = derive_status(date(2024, 1, 1), None, &falls, date(2024, 3, 1));
        assert_eq!(report.status, RopeStatus::Active);
        assert_eq!(report.minor_falls, 1);
    }

    #[test]
    fn test_two_minor_falls_damage() {
        let falls = [
            fall(date(2024, 2, 1), FallSeverity::Minor),
            fall(date(2024, 3, 1), FallSeverity::Minor),
        ];
        let report = derive_status(date(2023, 6, 1), Some(date(2024, 1, 1)), &falls, date(2024, 3, 2));
        assert_eq!(report.status, RopeStatus::Damaged);
        assert_eq!(report.minor_falls, 2);
    }

    #[test]
    fn test_fall_before_baseline_ignored() {
        let falls = [fall(date(2023, 12, 15), FallSeverity::Major)];
        let report = derive_status(date(2023, 1, 1), Some(date(2024, 1, 1)), &falls, date(2024, 1, 10));
        assert_eq!(report.status, RopeStatus::Active);
        assert_eq!(report.major_falls, 0);

        let overdue = derive_status(date(2023, 1, 1), Some(date(2024, 1, 1)), &falls, date(2025, 1, 2));
        assert_eq!(overdue.status, RopeStatus::InspectionDue);
    }

    #[test]
    fn test_fall_on_baseline_counts() {
        let falls = [fall(date(2024, 1, 1), FallSeverity::Major)];
        let report = derive_status(date(2023, 1, 1), Some(date(2024, 1, 1)), &falls, date(2024, 1, 1));
        assert_eq!(report.status, RopeStatus::Damaged);
    }

    #[test]
    fn test_due_boundary_is_exclusive() {
        let purchase = date(2024, 3, 1);
        let on_due = derive_status(purchase, None, &[], purchase + Duration::days(365));
        assert_eq!(on_due.status, RopeStatus::Active);
        let after_due = derive_status(purchase, None, &[], purchase + Duration::days(366));
        assert_eq!(after_due.status, RopeStatus::InspectionDue);
    }
}
