//! Polling loop that keeps the context document in step with the tree.

use crate::config::Config;
use crate::detector::{ExcludeSet, detect, relative_key};
use crate::document::{sync_document, temp_path_for};
use crate::{Error, Result};
use cck_engine::GeneratedRegion;
use cck_index::HistoryStore;
use cck_types::{ChangeEvent, Snapshot};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Produces the machine-owned region for a project root.
pub trait ContextSource {
    fn generate(&self, root: &Path) -> Result<GeneratedRegion>;
}

impl<F> ContextSource for F
where
    F: Fn(&Path) -> Result<GeneratedRegion>,
{
    fn generate(&self, root: &Path) -> Result<GeneratedRegion> {
        self(root)
    }
}

/// Scanner-backed source used by the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerSource;

impl ContextSource for ScannerSource {
    fn generate(&self, root: &Path) -> Result<GeneratedRegion> {
        Ok(cck_engine::render(&cck_scanner::scan_project(root)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Syncing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// First tick: snapshot recorded and the document synced once. The
    /// initial file listing is not persisted to history.
    Baseline { files: usize, written: bool },
    /// No file differs from the previous snapshot.
    Unchanged,
    Synced {
        events: Vec<ChangeEvent>,
        persisted: usize,
        written: bool,
    },
}

/// Single-threaded detect/persist/regenerate/merge/write cycle.
pub struct SyncLoop<S> {
    root: PathBuf,
    output: PathBuf,
    config: Config,
    source: S,
    excludes: ExcludeSet,
    snapshot: Option<Snapshot>,
    store: Option<HistoryStore>,
    state: LoopState,
}

impl<S: ContextSource> SyncLoop<S> {
    /// `output` may be relative to `root`.
    pub fn new(root: impl Into<PathBuf>, output: impl AsRef<Path>, config: Config, source: S) -> Self {
        let root = root.into();
        let output = root.join(output);
        let excludes = build_excludes(&root, &output, &config);

        Self {
            root,
            output,
            config,
            source,
            excludes,
            snapshot: None,
            store: None,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn excludes(&self) -> &ExcludeSet {
        &self.excludes
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run one cycle.
    ///
    /// On error the stored snapshot is left as it was, so the same changes
    /// are seen again on the next tick.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.state = LoopState::Syncing;
        let outcome = self.tick_inner();
        self.state = LoopState::Idle;
        outcome
    }

    fn tick_inner(&mut self) -> Result<TickOutcome> {
        let empty = Snapshot::new();
        let previous = self.snapshot.as_ref().unwrap_or(&empty);
        let detection = detect(
            &self.root,
            &self.config.watch.paths,
            &self.excludes,
            previous,
        );

        if self.snapshot.is_none() {
            let written = self.regenerate()?;
            let files = detection.snapshot.len();
            tracing::info!(files, written, "baseline established");
            self.snapshot = Some(detection.snapshot);
            return Ok(TickOutcome::Baseline { files, written });
        }

        if detection.events.is_empty() {
            return Ok(TickOutcome::Unchanged);
        }

        tracing::info!(events = detection.events.len(), "changes detected");
        let persisted = self.persist(&detection.events);
        let written = self.regenerate()?;
        self.snapshot = Some(detection.snapshot);

        Ok(TickOutcome::Synced {
            events: detection.events,
            persisted,
            written,
        })
    }

    /// Store failures are logged and do not stop the document sync.
    fn persist(&mut self, events: &[ChangeEvent]) -> usize {
        if !self.config.tracks_file_changes() {
            return 0;
        }

        match self.persist_events(events) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "failed to record changes in history");
                // reopen on the next tick
                self.store = None;
                0
            }
        }
    }

    fn persist_events(&mut self, events: &[ChangeEvent]) -> Result<usize> {
        if self.store.is_none() {
            let db_path = self.config.history_db_path(&self.root);
            self.store = Some(HistoryStore::open(&db_path)?);
        }
        let Some(store) = self.store.as_ref() else {
            return Err(Error::Config("history store unavailable".to_string()));
        };

        for event in events {
            store.record_event(event)?;
        }

        store.trim(self.config.history.max_entries)?;
        Ok(events.len())
    }

    fn regenerate(&self) -> Result<bool> {
        let region = self.source.generate(&self.root)?;
        sync_document(&self.output, &region)
    }

    /// Tick every `interval` until `cancel` is set. Tick errors are logged
    /// and the loop carries on.
    pub fn run(
        &mut self,
        interval: Duration,
        cancel: &AtomicBool,
        mut on_tick: impl FnMut(&TickOutcome),
    ) {
        while !cancel.load(Ordering::SeqCst) {
            match self.tick() {
                Ok(outcome) => on_tick(&outcome),
                Err(e) => tracing::error!(error = %e, "sync tick failed"),
            }
            sleep_unless_cancelled(interval, cancel);
        }
        tracing::info!("sync loop stopped");
    }
}

fn sleep_unless_cancelled(interval: Duration, cancel: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while !cancel.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}

/// Configured patterns plus the exact keys of everything the loop itself
/// writes.
fn build_excludes(root: &Path, output: &Path, config: &Config) -> ExcludeSet {
    let mut excludes = ExcludeSet::new(config.watch.exclude.iter().cloned());

    let own_files = [output.to_path_buf(), temp_path_for(output)];
    for path in own_files {
        if let Some(key) = relative_key(root, &path) {
            excludes.push_exact(key);
        }
    }

    let db_path = config.history_db_path(root);
    if let Some(key) = relative_key(root, &db_path) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            excludes.push_exact(format!("{}{}", key, suffix));
        }
    }

    excludes
}
