use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::change::ChangeKind;

/// A persisted file change, as stored in the `file_changes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChangeRecord {
    /// Store-assigned identifier, strictly increasing in insertion order.
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub kind: ChangeKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

/// A persisted operation (tool invocation, command run, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    /// Free-form operation name, e.g. `Bash`, `Edit`, `Task`.
    pub operation_type: String,
    pub summary: String,
}

/// Either category of history entry, as returned by combined queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum HistoryRecord {
    FileChange(FileChangeRecord),
    Operation(OperationRecord),
}

impl HistoryRecord {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            HistoryRecord::FileChange(record) => record.timestamp,
            HistoryRecord::Operation(record) => record.timestamp,
        }
    }

    /// Identifier within the record's own category.
    pub fn id(&self) -> i64 {
        match self {
            HistoryRecord::FileChange(record) => record.id,
            HistoryRecord::Operation(record) => record.id,
        }
    }
}

impl From<FileChangeRecord> for HistoryRecord {
    fn from(record: FileChangeRecord) -> Self {
        HistoryRecord::FileChange(record)
    }
}

impl From<OperationRecord> for HistoryRecord {
    fn from(record: OperationRecord) -> Self {
        HistoryRecord::Operation(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_history_record_serializes_with_category_tag() {
        let record = HistoryRecord::Operation(OperationRecord {
            id: 7,
            timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            operation_type: "Bash".to_string(),
            summary: "cargo test".to_string(),
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "operation");
        assert_eq!(json["operation_type"], "Bash");
        assert_eq!(record.id(), 7);
    }
}
