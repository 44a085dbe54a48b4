//! Per-turn reminder text injected into an assistant session.

use crate::config::{Config, ReminderSource};
use cck_index::{HistoryStore, render};
use std::fs;
use std::path::Path;

pub const HISTORY_HEADING: &str = "## Recent Activity";

/// Assemble the reminder according to `reminder.source`.
///
/// `None` means there is nothing worth injecting. Store failures are logged
/// and treated the same way.
pub fn build(config: &Config, root: &Path) -> Option<String> {
    match config.reminder.source {
        ReminderSource::File => from_file(config, root),
        ReminderSource::History => from_history(config, root),
        ReminderSource::Auto => {
            let history = if config.history.enabled {
                from_history(config, root)
            } else {
                None
            };
            history.or_else(|| from_file(config, root))
        }
    }
}

fn from_file(config: &Config, root: &Path) -> Option<String> {
    let path = config.reminder_file_path(root);
    let text = fs::read_to_string(&path).ok()?;
    let text = text.trim_end();
    if text.trim().is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn from_history(config: &Config, root: &Path) -> Option<String> {
    let db_path = config.history_db_path(root);
    if !db_path.exists() {
        return None;
    }

    let records = match HistoryStore::open(&db_path)
        .and_then(|store| store.combined_history(config.reminder.history_limit))
    {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(path = %db_path.display(), error = %e, "history unavailable for reminder");
            return None;
        }
    };
    if records.is_empty() {
        return None;
    }

    let body = render::render(config.reminder.format, &records);
    Some(format!("{}\n\n{}", HISTORY_HEADING, body))
}
