//! Database schema definitions

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use super::errors::StoreResult;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!(event = "SCHEMA_CREATED", version = SCHEMA_VERSION, "creating database schema");
        conn.execute_batch(ROPES_SCHEMA)?;
        conn.execute_batch(LOGS_SCHEMA)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            event = "SCHEMA_MIGRATED",
            from = current_version,
            to = SCHEMA_VERSION,
            "migrating database schema"
        );
        set_schema_version(conn, SCHEMA_VERSION)?;
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
pub fn get_schema_version(conn: &Connection) -> StoreResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| row.get(0))
        .optional()?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> StoreResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Rope registration table
const ROPES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS ropes (
    id TEXT PRIMARY KEY NOT NULL,
    product_name TEXT NOT NULL,
    thickness_mm REAL NOT NULL,
    length_m REAL NOT NULL,
    color TEXT NOT NULL DEFAULT '',
    batch TEXT NOT NULL DEFAULT '',
    manufacturing_date TEXT NOT NULL,
    purchase_date TEXT NOT NULL,
    customer_password_hash TEXT,
    created_at TEXT NOT NULL
);
"#;

/// Inspection and fall logs. Dates are ISO-8601 text, so range comparisons
/// order correctly.
const LOGS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS inspection_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rope_id TEXT NOT NULL REFERENCES ropes(id),
    inspection_date TEXT NOT NULL,
    comment TEXT,
    UNIQUE (rope_id, inspection_date)
);

CREATE TABLE IF NOT EXISTS fall_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rope_id TEXT NOT NULL REFERENCES ropes(id),
    fall_date TEXT NOT NULL,
    severity TEXT NOT NULL CHECK (severity IN ('major', 'minor')),
    comment TEXT
);

CREATE INDEX IF NOT EXISTS idx_fall_logs_rope_date ON fall_logs(rope_id, fall_date);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_sets_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        init_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' \
                 AND name IN ('ropes', 'inspection_logs', 'fall_logs')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }
}
