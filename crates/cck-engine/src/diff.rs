use cck_types::{ChangeKind, Snapshot};
use serde::{Deserialize, Serialize};

/// A path whose presence or modification time differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathChange {
    pub kind: ChangeKind,
    pub path: String,
}

impl PathChange {
    fn new(kind: ChangeKind, path: &str) -> Self {
        Self {
            kind,
            path: path.to_string(),
        }
    }
}

/// Classify every difference between `previous` and `current`.
///
/// - present now, absent before: `Created`
/// - present in both, modification time differs: `Modified`
/// - present before, absent now: `Deleted`
///
/// Paths with identical times produce nothing. Output is ordered by path.
/// An empty `previous` reports every current path as `Created`; callers that
/// treat the first poll as a baseline must handle that themselves.
pub fn diff_snapshots(previous: &Snapshot, current: &Snapshot) -> Vec<PathChange> {
    let mut changes = Vec::new();

    for (path, mtime) in current.iter() {
        match previous.get(path) {
            None => changes.push(PathChange::new(ChangeKind::Created, path)),
            Some(before) if before != mtime => {
                changes.push(PathChange::new(ChangeKind::Modified, path))
            }
            Some(_) => {}
        }
    }

    for (path, _) in previous.iter() {
        if !current.contains(path) {
            changes.push(PathChange::new(ChangeKind::Deleted, path));
        }
    }

    changes.sort_by(|a, b| a.path.cmp(&b.path));
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(entries: &[(&str, u128)]) -> Snapshot {
        entries.iter().map(|(p, t)| (*p, *t)).collect()
    }

    #[test]
    fn test_created_modified_deleted_lifecycle() {
        let s1 = snap(&[]);
        let s2 = snap(&[("a.py", 100)]);
        let s3 = snap(&[("a.py", 200)]);
        let s4 = snap(&[]);

        assert_eq!(
            diff_snapshots(&s1, &s2),
            vec![PathChange::new(ChangeKind::Created, "a.py")]
        );
        assert_eq!(
            diff_snapshots(&s2, &s3),
            vec![PathChange::new(ChangeKind::Modified, "a.py")]
        );
        assert_eq!(
            diff_snapshots(&s3, &s4),
            vec![PathChange::new(ChangeKind::Deleted, "a.py")]
        );
    }

    #[test]
    fn test_identical_snapshots_produce_nothing() {
        let s = snap(&[("a", 1), ("b/c", 2)]);
        assert!(diff_snapshots(&s, &s).is_empty());
    }

    #[test]
    fn test_changes_partition_the_symmetric_difference() {
        let before = snap(&[("keep", 1), ("touch", 1), ("drop", 1), ("also_drop", 9)]);
        let after = snap(&[("keep", 1), ("touch", 2), ("new", 5), ("another", 3)]);

        let changes = diff_snapshots(&before, &after);
        let of = |kind: ChangeKind| -> Vec<&str> {
            changes
                .iter()
                .filter(|c| c.kind == kind)
                .map(|c| c.path.as_str())
                .collect()
        };

        assert_eq!(of(ChangeKind::Created), vec!["another", "new"]);
        assert_eq!(of(ChangeKind::Modified), vec!["touch"]);
        assert_eq!(of(ChangeKind::Deleted), vec!["also_drop", "drop"]);
        assert_eq!(changes.len(), 5);
    }

    #[test]
    fn test_output_is_sorted_by_path_across_kinds() {
        let before = snap(&[("b", 1), ("d", 1)]);
        let after = snap(&[("a", 1), ("b", 2)]);

        let changes = diff_snapshots(&before, &after);
        let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "d"]);
    }
}
