use rusqlite::{Connection, TransactionBehavior};

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: History Store Design
//
// The two tables are a published interface: hooks and ad-hoc sqlite3 sessions
// query them directly, so column names stay stable and timestamps are stored
// as fixed-width RFC 3339 UTC text (lexical order == chronological order).
//
// Creation runs inside an IMMEDIATE transaction with IF NOT EXISTS on every
// statement. Two processes opening a fresh file at once serialize on the
// write lock and the loser's statements become no-ops.

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let current_version: i32 = tx.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if current_version > SCHEMA_VERSION {
        return Err(Error::Query(format!(
            "history database uses schema version {} but this build supports up to {}",
            current_version, SCHEMA_VERSION
        )));
    }

    tx.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS file_changes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            file_path TEXT NOT NULL,
            snippet TEXT
        );

        CREATE TABLE IF NOT EXISTS operations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            operation_type TEXT NOT NULL,
            summary TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_file_changes_timestamp ON file_changes(timestamp DESC);
        CREATE INDEX IF NOT EXISTS idx_operations_timestamp ON operations(timestamp DESC);
        "#,
    )?;

    tx.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    tx.commit()?;

    Ok(())
}
