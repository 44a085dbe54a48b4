use cck_types::{ChangeEvent, ChangeKind, FileChangeRecord, HistoryRecord, OperationRecord};
use chrono::Utc;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use crate::queries::{file_change, operation};
use crate::schema;
use crate::Result;

/// How long a writer waits on another process's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Rows removed by a retention pass, per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub changes_removed: usize,
    pub operations_removed: usize,
}

impl TrimReport {
    pub fn total(&self) -> usize {
        self.changes_removed + self.operations_removed
    }
}

/// Durable, append-only log of file changes and operations.
///
/// Every append runs in SQLite's autocommit mode, so the row is committed
/// (and fsynced, `synchronous = FULL`) before the call returns. A reader in
/// another process sees either the previous state or the complete new row.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute("PRAGMA synchronous = FULL", [])?;
        schema::init_schema(&mut conn)?;

        tracing::debug!(journal_mode = %mode, "history store opened");
        Ok(Self { conn })
    }

    /// Record a file change stamped with the current time.
    pub fn append_change(
        &self,
        kind: ChangeKind,
        path: &str,
        snippet: Option<&str>,
    ) -> Result<i64> {
        let snippet = match kind {
            ChangeKind::Deleted => None,
            _ => snippet,
        };
        file_change::insert(&self.conn, &Utc::now(), kind, path, snippet)
    }

    /// Persist a detector event, keeping the time it was observed.
    pub fn record_event(&self, event: &ChangeEvent) -> Result<i64> {
        file_change::insert(
            &self.conn,
            &event.timestamp,
            event.kind,
            &event.path,
            event.snippet.as_deref(),
        )
    }

    pub fn append_operation(&self, operation_type: &str, summary: &str) -> Result<i64> {
        operation::insert(&self.conn, &Utc::now(), operation_type, summary)
    }

    pub fn recent_changes(&self, limit: usize) -> Result<Vec<FileChangeRecord>> {
        file_change::recent(&self.conn, limit)
    }

    pub fn recent_operations(&self, limit: usize) -> Result<Vec<OperationRecord>> {
        operation::recent(&self.conn, limit)
    }

    /// Both categories interleaved newest-first, at most `limit` entries.
    pub fn combined_history(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let changes = self.recent_changes(limit)?;
        let operations = self.recent_operations(limit)?;
        Ok(merge_by_recency(changes, operations, limit))
    }

    pub fn count_changes(&self) -> Result<usize> {
        file_change::count(&self.conn)
    }

    pub fn count_operations(&self) -> Result<usize> {
        operation::count(&self.conn)
    }

    /// Keep only the `max_entries` most recent rows of each category.
    ///
    /// The two deletes are independent statements; an append racing between
    /// them is handled by the next trim.
    pub fn trim(&self, max_entries: usize) -> Result<TrimReport> {
        let report = TrimReport {
            changes_removed: file_change::trim(&self.conn, max_entries)?,
            operations_removed: operation::trim(&self.conn, max_entries)?,
        };

        if report.total() > 0 {
            tracing::debug!(
                changes = report.changes_removed,
                operations = report.operations_removed,
                max_entries,
                "trimmed history"
            );
        }
        Ok(report)
    }
}

/// Two-way merge of newest-first lists into one newest-first list.
///
/// On equal timestamps the file change is emitted first.
pub fn merge_by_recency(
    changes: Vec<FileChangeRecord>,
    operations: Vec<OperationRecord>,
    limit: usize,
) -> Vec<HistoryRecord> {
    let mut merged = Vec::with_capacity(limit.min(changes.len() + operations.len()));
    let mut changes = changes.into_iter().peekable();
    let mut operations = operations.into_iter().peekable();

    while merged.len() < limit {
        let take_change = match (changes.peek(), operations.peek()) {
            (Some(change), Some(op)) => change.timestamp >= op.timestamp,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        let next = if take_change {
            changes.next().map(HistoryRecord::from)
        } else {
            operations.next().map(HistoryRecord::from)
        };
        match next {
            Some(record) => merged.push(record),
            None => break,
        }
    }

    merged
}
