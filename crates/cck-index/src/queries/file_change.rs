use cck_types::{ChangeKind, FileChangeRecord};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};

use super::{decode_timestamp, encode_timestamp, sql_limit};
use crate::Result;

pub fn insert(
    conn: &Connection,
    timestamp: &DateTime<Utc>,
    kind: ChangeKind,
    path: &str,
    snippet: Option<&str>,
) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO file_changes (timestamp, event_type, file_path, snippet)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![encode_timestamp(timestamp), kind.as_str(), path, snippet],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<FileChangeRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, timestamp, event_type, file_path, snippet
        FROM file_changes
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
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM file_changes", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Delete everything but the `keep` most recent rows; returns rows removed.
pub fn trim(conn: &Connection, keep: usize) -> Result<usize> {
    let removed = conn.execute(
        r#"
        DELETE FROM file_changes WHERE id NOT IN (
            SELECT id FROM file_changes ORDER BY timestamp DESC, id DESC LIMIT ?1
        )
        "#,
        [sql_limit(keep)],
    )?;

    Ok(removed)
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<FileChangeRecord> {
    let raw_kind: String = row.get(2)?;
    let kind = raw_kind
        .parse::<ChangeKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(FileChangeRecord {
        id: row.get(0)?,
        timestamp: decode_timestamp(1, row.get(1)?)?,
        kind,
        path: row.get(3)?,
        snippet: row.get(4)?,
    })
}
