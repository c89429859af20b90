//! In-memory rope store for testing
//!
//! Enforces the same constraints as the SQLite tables: unique rope ids,
//! one inspection per (rope, date), logs only for registered ropes.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use super::errors::{StoreError, StoreResult};
use super::RopeStore;
use crate::rope::types::{FallRecord, InspectionRecord, NewFall, NewInspection, Rope, RopeId};

#[derive(Debug, Default)]
struct Tables {
    ropes: BTreeMap<RopeId, Rope>,
    inspections: Vec<InspectionRecord>,
    falls: Vec<FallRecord>,
    next_row_id: i64,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_row_id += 1;
        self.next_row_id
    }
}

/// In-memory rope store
#[derive(Debug, Default)]
pub struct InMemoryRopeStore {
    tables: RwLock<Tables>,
}

impl InMemoryRopeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

impl RopeStore for InMemoryRopeStore {
    fn insert_rope(&self, rope: &Rope) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        if tables.ropes.contains_key(&rope.id) {
            return Err(StoreError::UniqueViolation("ropes.id".to_string()));
        }

        tables.ropes.insert(rope.id.clone(), rope.clone());
        Ok(())
    }

    fn find_rope(&self, id: &RopeId) -> StoreResult<Option<Rope>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.ropes.get(id).cloned())
    }

    fn list_ropes(&self) -> StoreResult<Vec<Rope>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut ropes: Vec<Rope> = tables.ropes.values().cloned().collect();
        ropes.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(ropes)
    }

    fn latest_inspection_date(&self, id: &RopeId) -> StoreResult<Option<NaiveDate>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .inspections
            .iter()
            .filter(|i| &i.rope_id == id)
            .map(|i| i.inspection_date)
            .max())
    }

    fn falls_since(&self, id: &RopeId, since: NaiveDate) -> StoreResult<Vec<FallRecord>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let rows = tables
            .falls
            .iter()
            .filter(|f| &f.rope_id == id && f.fall_date >= since)
            .cloned()
            .collect();
        Ok(newest_first(rows, |f: &FallRecord| (f.fall_date, f.id)))
    }

    fn insert_inspection(
        &self,
        id: &RopeId,
        inspection: &NewInspection,
    ) -> StoreResult<InspectionRecord> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        if !tables.ropes.contains_key(id) {
            return Err(StoreError::MissingRope);
        }
        if tables
            .inspections
            .iter()
            .any(|i| &i.rope_id == id && i.inspection_date == inspection.inspection_date)
        {
            return Err(StoreError::UniqueViolation(
                "inspection_logs.rope_id, inspection_logs.inspection_date".to_string(),
            ));
        }

        let record = InspectionRecord {
            id: tables.allocate_id(),
            rope_id: id.clone(),
            inspection_date: inspection.inspection_date,
            comment: inspection.comment.clone(),
        };
        tables.inspections.push(record.clone());
        Ok(record)
    }

    fn insert_fall(&self, id: &RopeId, fall: &NewFall) -> StoreResult<FallRecord> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        if !tables.ropes.contains_key(id) {
            return Err(StoreError::MissingRope);
        }

        let record = FallRecord {
            id: tables.allocate_id(),
            rope_id: id.clone(),
            fall_date: fall.fall_date,
            severity: fall.severity,
            comment: fall.comment.clone(),
        };
        tables.falls.push(record.clone());
        Ok(record)
    }

    fn inspections_for(&self, id: &RopeId) -> StoreResult<Vec<InspectionRecord>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let rows = tables
            .inspections
            .iter()
            .filter(|i| &i.rope_id == id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |i: &InspectionRecord| i.inspection_date))
    }

    fn falls_for(&self, id: &RopeId) -> StoreResult<Vec<FallRecord>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let rows = tables
            .falls
            .iter()
            .filter(|f| &f.rope_id == id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |f: &FallRecord| (f.fall_date, f.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rope::types::FallSeverity;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rope(id: &str) -> Rope {
        Rope {
            id: RopeId::parse(id).unwrap(),
            product_name: "Mammut Crag 9.5".to_string(),
            thickness_mm: 9.5,
            length_m: 60.0,
            color: "green".to_string(),
            batch: "C-1".to_string(),
            manufacturing_date: date(2023, 1, 1),
            purchase_date: date(2023, 2, 1),
            customer_password_hash: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_constraints_match_sqlite() {
        let store = InMemoryRopeStore::new();
        let r = rope("MEMROPE001");
        store.insert_rope(&r).unwrap();
        assert!(matches!(
            store.insert_rope(&r),
            Err(StoreError::UniqueViolation(_))
        ));

        let day = NewInspection {
            inspection_date: date(2024, 1, 1),
            comment: None,
        };
        store.insert_inspection(&r.id, &day).unwrap();
        assert!(matches!(
            store.insert_inspection(&r.id, &day),
            Err(StoreError::UniqueViolation(_))
        ));

        let ghost = RopeId::parse("GHOST00000").unwrap();
        assert!(matches!(
            store.insert_inspection(&ghost, &day),
            Err(StoreError::MissingRope)
        ));
    }

    #[test]
    fn test_falls_since_is_inclusive() {
        let store = InMemoryRopeStore::new();
        let r = rope("MEMROPE001");
        store.insert_rope(&r).unwrap();

        for on in [date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)] {
            store
                .insert_fall(
                    &r.id,
                    &NewFall {
                        fall_date: on,
                        severity: FallSeverity::Minor,
                        comment: None,
                    },
                )
                .unwrap();
        }

        let since = store.falls_since(&r.id, date(2024, 1, 1)).unwrap();
        let dates: Vec<_> = since.iter().map(|f| f.fall_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 1)]);
    }
}
