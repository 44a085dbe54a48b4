use cck_types::{FileChangeRecord, HistoryRecord, OperationRecord};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const COMPACT_SUMMARY_CHARS: usize = 40;
const DETAILED_SNIPPET_CHARS: usize = 80;

/// Layout used when history is shown to a user or injected as a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFormat {
    /// One line per record.
    #[default]
    Compact,
    /// Full timestamps, full kinds, and a snippet line for file changes.
    Detailed,
}

impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryFormat::Compact => write!(f, "compact"),
            HistoryFormat::Detailed => write!(f, "detailed"),
        }
    }
}

pub fn render(format: HistoryFormat, records: &[HistoryRecord]) -> String {
    match format {
        HistoryFormat::Compact => compact(records),
        HistoryFormat::Detailed => detailed(records),
    }
}

/// `HH:MM:SS <symbol> <path>` for changes, `HH:MM:SS $ <type>: <summary>` for
/// operations, local time.
pub fn compact(records: &[HistoryRecord]) -> String {
    records
        .iter()
        .map(|record| match record {
            HistoryRecord::FileChange(change) => format!(
                "{} {} {}",
                time_of_day(&change.timestamp),
                change.kind.symbol(),
                change.path
            ),
            HistoryRecord::Operation(op) => format!(
                "{} $ {}: {}",
                time_of_day(&op.timestamp),
                op.operation_type,
                truncate_chars(&op.summary, COMPACT_SUMMARY_CHARS)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn detailed(records: &[HistoryRecord]) -> String {
    let mut lines = Vec::new();
    for record in records {
        match record {
            HistoryRecord::FileChange(change) => detailed_change(change, &mut lines),
            HistoryRecord::Operation(op) => detailed_operation(op, &mut lines),
        }
    }
    lines.join("\n")
}

fn detailed_change(change: &FileChangeRecord, lines: &mut Vec<String>) {
    lines.push(format!(
        "[{}] File {}: {}",
        full_timestamp(&change.timestamp),
        change.kind,
        change.path
    ));

    if let Some(snippet) = change.snippet.as_deref() {
        let flattened = snippet.split_whitespace().collect::<Vec<_>>().join(" ");
        if !flattened.is_empty() {
            lines.push(format!(
                "  > {}",
                truncate_chars(&flattened, DETAILED_SNIPPET_CHARS)
            ));
        }
    }
}

fn detailed_operation(op: &OperationRecord, lines: &mut Vec<String>) {
    lines.push(format!(
        "[{}] {}: {}",
        full_timestamp(&op.timestamp),
        op.operation_type,
        op.summary
    ));
}

fn time_of_day(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

fn full_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
