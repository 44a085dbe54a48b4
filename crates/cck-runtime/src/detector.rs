use cck_engine::diff_snapshots;
use cck_types::{ChangeEvent, ChangeKind, ModTime, SNIPPET_MAX_BYTES, Snapshot};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Exclusion rules for the detector.
///
/// A path is excluded when any of its components equals a pattern, or when
/// the whole relative path ends with a pattern (so `.claude/history.sqlite`
/// or `.sqlite-wal` work as suffixes).
///
/// Exact keys are matched by equality only. They hold files the sync loop
/// writes itself, so a nested `docs/CLAUDE.md` stays visible when the
/// output is `CLAUDE.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    exact: BTreeSet<String>,
}

impl ExcludeSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for pattern in patterns {
            set.push(pattern);
        }
        set
    }

    pub fn push(&mut self, pattern: impl Into<String>) {
        let pattern = normalize(&pattern.into());
        if !pattern.is_empty() && !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Exclude one root-relative key and nothing else.
    pub fn push_exact(&mut self, key: impl Into<String>) {
        let key = normalize(&key.into());
        if !key.is_empty() {
            self.exact.insert(key);
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn exact_keys(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    /// `rel_path` uses `/` separators and is relative to the project root.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        if self.exact.contains(rel_path) {
            return true;
        }
        self.patterns.iter().any(|pattern| {
            rel_path.split('/').any(|segment| segment == pattern)
                || rel_path.ends_with(pattern.as_str())
        })
    }

    /// Directory pruning only looks at the directory's own name; ancestors
    /// were checked on the way down.
    fn prunes_dir(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern == name)
    }
}

fn normalize(pattern: &str) -> String {
    pattern
        .trim()
        .trim_start_matches("./")
        .trim_end_matches('/')
        .replace('\\', "/")
}

/// Relative key for `path` under `root`, `/`-separated, or `None` if the path
/// escapes `root`.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Modification times of every regular file under the watched paths.
///
/// Unreadable entries are skipped one at a time; a broken subtree never
/// aborts the scan.
pub fn take_snapshot(root: &Path, watch_paths: &[String], excludes: &ExcludeSet) -> Snapshot {
    let mut snapshot = Snapshot::new();

    let default_paths = [".".to_string()];
    let watch_paths = if watch_paths.is_empty() {
        &default_paths[..]
    } else {
        watch_paths
    };

    for watch_path in watch_paths {
        let start = root.join(watch_path);
        let walker = WalkDir::new(&start)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !excludes.prunes_dir(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(key) = relative_key(root, entry.path()) else {
                continue;
            };
            if excludes.is_excluded(&key) {
                continue;
            }

            let modified = entry
                .metadata()
                .map_err(std::io::Error::from)
                .and_then(|m| m.modified());
            match modified {
                Ok(modified) => snapshot.insert(key, ModTime::from_system_time(modified)),
                Err(e) => tracing::debug!(path = %key, error = %e, "no modification time"),
            }
        }
    }

    snapshot
}

/// Outcome of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub snapshot: Snapshot,
    pub events: Vec<ChangeEvent>,
}

/// Snapshot the tree and classify it against `previous`.
///
/// Created and Modified events carry a snippet when the file still reads as
/// text. An empty `previous` reports every file as Created.
pub fn detect(
    root: &Path,
    watch_paths: &[String],
    excludes: &ExcludeSet,
    previous: &Snapshot,
) -> Detection {
    let snapshot = take_snapshot(root, watch_paths, excludes);

    let events = diff_snapshots(previous, &snapshot)
        .into_iter()
        .map(|change| {
            let snippet = match change.kind {
                ChangeKind::Deleted => None,
                _ => read_snippet(&root.join(&change.path)),
            };
            ChangeEvent::new(change.kind, change.path).with_snippet(snippet)
        })
        .collect();

    Detection { snapshot, events }
}

/// First bytes of a file as text.
///
/// A multi-byte character cut by the byte limit is dropped. Non-UTF-8
/// content, empty files, and read failures give `None`.
pub fn read_snippet(path: &Path) -> Option<String> {
    let mut buf = Vec::with_capacity(SNIPPET_MAX_BYTES);
    let read = File::open(path)
        .and_then(|f| f.take(SNIPPET_MAX_BYTES as u64).read_to_end(&mut buf));
    if let Err(e) = read {
        tracing::debug!(path = %path.display(), error = %e, "snippet unavailable");
        return None;
    }

    let text = match String::from_utf8(buf) {
        Ok(text) => text,
        Err(e) => {
            let utf8 = e.utf8_error();
            // error_len() == None: input ended mid-character
            if utf8.error_len().is_some() {
                return None;
            }
            let valid = utf8.valid_up_to();
            let mut bytes = e.into_bytes();
            bytes.truncate(valid);
            String::from_utf8(bytes).ok()?
        }
    };

    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::{FileTime, set_file_mtime};
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn all() -> Vec<String> {
        vec![".".to_string()]
    }

    #[test]
    fn test_exclude_by_segment_and_suffix() {
        let excludes = ExcludeSet::new([".git", "node_modules", ".claude/cck_history.sqlite"]);

        assert!(excludes.is_excluded(".git/HEAD"));
        assert!(excludes.is_excluded("web/node_modules/react/index.js"));
        assert!(excludes.is_excluded(".claude/cck_history.sqlite"));
        assert!(!excludes.is_excluded(".claude/cck_history.sqlite-wal"));
        assert!(!excludes.is_excluded("src/git.rs"));
    }

    #[test]
    fn test_exact_keys_match_only_that_path() {
        let mut excludes = ExcludeSet::default();
        excludes.push_exact("CLAUDE.md");

        assert!(excludes.is_excluded("CLAUDE.md"));
        assert!(!excludes.is_excluded("docs/CLAUDE.md"));
        assert!(!excludes.is_excluded("docs/MYCLAUDE.md"));
        assert!(excludes.patterns().is_empty());
    }

    #[test]
    fn test_exact_key_does_not_prune_directories_of_the_same_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "state/h.sqlite", b"x");
        write(dir.path(), "pkg/state/notes.md", b"x");
        let mut excludes = ExcludeSet::default();
        excludes.push_exact("state/h.sqlite");
        excludes.push_exact("state");

        let snapshot = take_snapshot(dir.path(), &all(), &excludes);

        let keys: Vec<&str> = snapshot.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pkg/state/notes.md"]);
    }

    #[test]
    fn test_patterns_are_normalized() {
        let excludes = ExcludeSet::new(["./build/", "  ", "build"]);
        assert_eq!(excludes.patterns(), &["build".to_string()]);
    }

    #[test]
    fn test_relative_key_uses_forward_slashes() {
        let root = Path::new("/project");
        assert_eq!(
            relative_key(root, &root.join("src").join("main.rs")).as_deref(),
            Some("src/main.rs")
        );
        assert_eq!(relative_key(root, Path::new("/elsewhere/x")), None);
        assert_eq!(relative_key(root, root), None);
    }

    #[test]
    fn test_snapshot_skips_excluded_trees() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.py", b"x");
        write(dir.path(), ".git/objects/ab", b"x");
        write(dir.path(), "node_modules/a/b.js", b"x");

        let snapshot = take_snapshot(dir.path(), &all(), &ExcludeSet::new([".git", "node_modules"]));

        let keys: Vec<&str> = snapshot.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["src/app.py"]);
    }

    #[test]
    fn test_watch_paths_limit_scope_but_keys_stay_root_relative() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/lib.rs", b"x");
        write(dir.path(), "docs/guide.md", b"x");

        let snapshot = take_snapshot(dir.path(), &["src".to_string()], &ExcludeSet::default());

        assert!(snapshot.contains("src/lib.rs"));
        assert!(!snapshot.contains("docs/guide.md"));
    }

    #[test]
    fn test_missing_watch_path_yields_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshot = take_snapshot(dir.path(), &["nope".to_string()], &ExcludeSet::default());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_detect_classifies_with_forced_mtimes() {
        let dir = TempDir::new().unwrap();
        let excludes = ExcludeSet::default();
        write(dir.path(), "a.py", b"print('a')");
        set_file_mtime(dir.path().join("a.py"), FileTime::from_unix_time(100, 0)).unwrap();

        let first = detect(dir.path(), &all(), &excludes, &Snapshot::new());
        assert_eq!(first.events.len(), 1);
        assert_eq!(first.events[0].kind, ChangeKind::Created);
        assert_eq!(first.events[0].snippet.as_deref(), Some("print('a')"));

        let unchanged = detect(dir.path(), &all(), &excludes, &first.snapshot);
        assert!(unchanged.events.is_empty());

        set_file_mtime(dir.path().join("a.py"), FileTime::from_unix_time(200, 0)).unwrap();
        let modified = detect(dir.path(), &all(), &excludes, &unchanged.snapshot);
        assert_eq!(modified.events.len(), 1);
        assert_eq!(modified.events[0].kind, ChangeKind::Modified);

        fs::remove_file(dir.path().join("a.py")).unwrap();
        let deleted = detect(dir.path(), &all(), &excludes, &modified.snapshot);
        assert_eq!(deleted.events.len(), 1);
        assert_eq!(deleted.events[0].kind, ChangeKind::Deleted);
        assert_eq!(deleted.events[0].snippet, None);
        assert!(deleted.snapshot.is_empty());
    }

    #[test]
    fn test_snippet_is_bounded_and_char_safe() {
        let dir = TempDir::new().unwrap();
        let mut content = "a".repeat(SNIPPET_MAX_BYTES - 1).into_bytes();
        content.extend("é tail".as_bytes());
        write(dir.path(), "long.txt", &content);

        let snippet = read_snippet(&dir.path().join("long.txt")).unwrap();
        assert_eq!(snippet, "a".repeat(SNIPPET_MAX_BYTES - 1));
    }

    #[test]
    fn test_binary_and_empty_files_have_no_snippet() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blob.bin", &[0xff, 0xfe, 0x00, 0x41]);
        write(dir.path(), "empty.txt", b"");

        assert_eq!(read_snippet(&dir.path().join("blob.bin")), None);
        assert_eq!(read_snippet(&dir.path().join("empty.txt")), None);
        assert_eq!(read_snippet(&dir.path().join("missing.txt")), None);
    }
}
