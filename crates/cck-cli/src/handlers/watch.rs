use super::resolve_root;
use crate::types::OutputFormat;
use crate::views::watch::TickView;
use crate::views::{self, Palette};
use anyhow::{Context, Result};
use cck_runtime::{Config, ScannerSource, SyncLoop, TickOutcome};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub fn handle(path: &Path, output: &str, interval_secs: u64, format: OutputFormat) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root);
    let interval = Duration::from_secs(interval_secs);
    let palette = Palette::detect();

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }

    let mut sync = SyncLoop::new(&root, output, config, ScannerSource);

    if format == OutputFormat::Plain {
        views::watch::print_header(&palette, &root, sync.output(), interval);
    }

    sync.run(interval, &cancel, |outcome| match format {
        OutputFormat::Plain => {
            if !matches!(outcome, TickOutcome::Unchanged) {
                println!("{}", TickView::new(outcome, palette));
            }
        }
        OutputFormat::Json => {
            if let Some(line) = tick_json(outcome) {
                println!("{}", line);
            }
        }
    });

    if format == OutputFormat::Plain {
        views::watch::print_stopped(&palette);
    }
    Ok(())
}

/// One JSON object per line, for piping into other tools.
fn tick_json(outcome: &TickOutcome) -> Option<String> {
    let value = match outcome {
        TickOutcome::Baseline { files, written } => serde_json::json!({
            "event": "baseline",
            "files": files,
            "written": written,
        }),
        TickOutcome::Synced {
            events,
            persisted,
            written,
        } => serde_json::json!({
            "event": "synced",
            "changes": events,
            "persisted": persisted,
            "written": written,
        }),
        TickOutcome::Unchanged => return None,
    };
    Some(value.to_string())
}
