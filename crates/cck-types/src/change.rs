use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Error;

/// Upper bound on the sampled file prefix carried by a change event.
pub const SNIPPET_MAX_BYTES: usize = 200;

/// Classification of a difference between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// Lowercase name stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }

    /// One-character symbol used by compact history rendering.
    pub fn symbol(&self) -> char {
        match self {
            ChangeKind::Created => '+',
            ChangeKind::Modified => '~',
            ChangeKind::Deleted => '-',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ChangeKind::Created),
            "modified" => Ok(ChangeKind::Modified),
            "deleted" => Ok(ChangeKind::Deleted),
            other => Err(Error::UnknownChangeKind(other.to_string())),
        }
    }
}

/// File modification time as nanoseconds since the Unix epoch.
///
/// Only equality matters to the detector; ordering is provided for
/// deterministic display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModTime(u128);

impl ModTime {
    pub fn from_nanos(nanos: u128) -> Self {
        Self(nanos)
    }

    /// Times before the epoch collapse to zero.
    pub fn from_system_time(time: SystemTime) -> Self {
        Self(
            time.duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default(),
        )
    }

    pub fn as_nanos(&self) -> u128 {
        self.0
    }
}

impl From<u128> for ModTime {
    fn from(nanos: u128) -> Self {
        Self(nanos)
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

/// Point-in-time mapping of root-relative file path to modification time.
///
/// Paths use `/` as separator regardless of platform so snapshots taken on
/// the same tree compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    entries: BTreeMap<String, ModTime>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, mtime: impl Into<ModTime>) {
        self.entries.insert(path.into(), mtime.into());
    }

    pub fn get(&self, path: &str) -> Option<ModTime> {
        self.entries.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModTime)> {
        self.entries.iter().map(|(path, mtime)| (path.as_str(), *mtime))
    }
}

impl<P: Into<String>, M: Into<ModTime>> FromIterator<(P, M)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (P, M)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (path, mtime) in iter {
            snapshot.insert(path, mtime);
        }
        snapshot
    }
}

/// A single classified difference observed by the change detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl ChangeEvent {
    /// Event stamped with the current wall-clock time and no snippet.
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            timestamp: Utc::now(),
            snippet: None,
        }
    }

    /// Attach a content sample.
    ///
    /// Deleted events never carry a snippet, and the text is cut back to at
    /// most [`SNIPPET_MAX_BYTES`] on a character boundary.
    pub fn with_snippet(mut self, snippet: Option<String>) -> Self {
        self.snippet = match self.kind {
            ChangeKind::Deleted => None,
            _ => snippet.map(|s| truncate_bytes(&s, SNIPPET_MAX_BYTES).to_string()),
        };
        self
    }
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
