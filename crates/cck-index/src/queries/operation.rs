use cck_types::OperationRecord;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};

use super::{decode_timestamp, encode_timestamp, sql_limit};
use crate::Result;

pub fn insert(
    conn: &Connection,
    timestamp: &DateTime<Utc>,
    operation_type: &str,
    summary: &str,
) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO operations (timestamp, operation_type, summary)
        VALUES (?1, ?2, ?3)
        "#,
        params![encode_timestamp(timestamp), operation_type, summary],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<OperationRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, timestamp, operation_type, summary
        FROM operations
        ORDER BY timestamp DESC, id DESC
        LIMIT ?1
        "#,
    )?;

    let records = stmt
        .query_map([sql_limit(limit)], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(records)
}

pub fn count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM operations", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn trim(conn: &Connection, keep: usize) -> Result<usize> {
    let removed = conn.execute(
        r#"
        DELETE FROM operations WHERE id NOT IN (
            SELECT id FROM operations ORDER BY timestamp DESC, id DESC LIMIT ?1
        )
        "#,
        [sql_limit(keep)],
    )?;

    Ok(removed)
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<OperationRecord> {
    Ok(OperationRecord {
        id: row.get(0)?,
        timestamp: decode_timestamp(1, row.get(1)?)?,
        operation_type: row.get(2)?,
        summary: row.get(3)?,
    })
}
