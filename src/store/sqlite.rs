//! SQLite-backed rope store

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use super::schema;
use super::RopeStore;
use crate::rope::types::{
    FallRecord, FallSeverity, InspectionRecord, NewFall, NewInspection, Rope, RopeId,
};

impl ToSql for RopeId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RopeId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        RopeId::parse(value.as_str()?).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl ToSql for FallSeverity {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FallSeverity {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

const ROPE_COLUMNS: &str = "id, product_name, thickness_mm, length_m, color, batch, \
     manufacturing_date, purchase_date, customer_password_hash, created_at";

fn rope_from_row(row: &Row) -> rusqlite::Result<Rope> {
    Ok(Rope {
        id: row.get(0)?,
        product_name: row.get(1)?,
        thickness_mm: row.get(2)?,
        length_m: row.get(3)?,
        color: row.get(4)?,
        batch: row.get(5)?,
        manufacturing_date: row.get(6)?,
        purchase_date: row.get(7)?,
        customer_password_hash: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn inspection_from_row(row: &Row) -> rusqlite::Result<InspectionRecord> {
    Ok(InspectionRecord {
        id: row.get(0)?,
        rope_id: row.get(1)?,
        inspection_date: row.get(2)?,
        comment: row.get(3)?,
    })
}

fn fall_from_row(row: &Row) -> rusqlite::Result<FallRecord> {
    Ok(FallRecord {
        id: row.get(0)?,
        rope_id: row.get(1)?,
        fall_date: row.get(2)?,
        severity: row.get(3)?,
        comment: row.get(4)?,
    })
}

/// SQLite database holding the `ropes`, `inspection_logs` and `fall_logs` tables
pub struct SqliteRopeStore {
    conn: Mutex<Connection>,
}

impl SqliteRopeStore {
    /// Open or create the database file
    pub fn open(path: &Path) -> StoreResult<Self> {
        info!(event = "STORE_OPEN", path = %path.display(), "opening SQLite database");

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        debug!("opening in-memory SQLite database");
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn).map_err(StoreError::from)
    }
}

impl RopeStore for SqliteRopeStore {
    fn insert_rope(&self, rope: &Rope) -> StoreResult<()> {
        self.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO ropes ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    ROPE_COLUMNS
                ),
                params![
                    rope.id,
                    rope.product_name,
                    rope.thickness_mm,
                    rope.length_m,
                    rope.color,
                    rope.batch,
                    rope.manufacturing_date,
                    rope.purchase_date,
                    rope.customer_password_hash,
                    rope.created_at,
                ],
            )
            .map(|_| ())
        })
    }

    fn find_rope(&self, id: &RopeId) -> StoreResult<Option<Rope>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM ropes WHERE id = ?1", ROPE_COLUMNS),
                params![id],
                rope_from_row,
            )
            .optional()
        })
    }

    fn list_ropes(&self) -> StoreResult<Vec<Rope>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM ropes ORDER BY created_at, id",
                ROPE_COLUMNS
            ))?;
            let rows = stmt.query_map([], rope_from_row)?;
            rows.collect()
        })
    }

    fn latest_inspection_date(&self, id: &RopeId) -> StoreResult<Option<NaiveDate>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT MAX(inspection_date) FROM inspection_logs WHERE rope_id = ?1",
                params![id],
                |row| row.get(0),
            )
        })
    }

    fn falls_since(&self, id: &RopeId, since: NaiveDate) -> StoreResult<Vec<FallRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, rope_id, fall_date, severity, comment FROM fall_logs \
                 WHERE rope_id = ?1 AND fall_date >= ?2 \
                 ORDER BY fall_date DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![id, since], fall_from_row)?;
            rows.collect()
        })
    }

    fn insert_inspection(
        &self,
        id: &RopeId,
        inspection: &NewInspection,
    ) -> StoreResult<InspectionRecord> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inspection_logs (rope_id, inspection_date, comment) \
                 VALUES (?1, ?2, ?3)",
                params![id, inspection.inspection_date, inspection.comment],
            )?;
            Ok(InspectionRecord {
                id: conn.last_insert_rowid(),
                rope_id: id.clone(),
                inspection_date: inspection.inspection_date,
                comment: inspection.comment.clone(),
            })
        })
    }

    fn insert_fall(&self, id: &RopeId, fall: &NewFall) -> StoreResult<FallRecord> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO fall_logs (rope_id, fall_date, severity, comment) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, fall.fall_date, fall.severity, fall.comment],
            )?;
            Ok(FallRecord {
                id: conn.last_insert_rowid(),
                rope_id: id.clone(),
                fall_date: fall.fall_date,
                severity: fall.severity,
                comment: fall.comment.clone(),
            })
        })
    }

    fn inspections_for(&self, id: &RopeId) -> StoreResult<Vec<InspectionRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, rope_id, inspection_date, comment FROM inspection_logs \
                 WHERE rope_id = ?1 ORDER BY inspection_date DESC",
            )?;
            let rows = stmt.query_map(params![id], inspection_from_row)?;
            rows.collect()
        })
    }

    fn falls_for(&self, id: &RopeId) -> StoreResult<Vec<FallRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, rope_id, fall_date, severity, comment FROM fall_logs \
                 WHERE rope_id = ?1 ORDER BY fall_date DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![id], fall_from_row)?;
            rows.collect()
        })
    }
}
