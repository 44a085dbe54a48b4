use super::resolve_root;
use anyhow::{Context, Result};
use cck_index::HistoryStore;
use cck_runtime::Config;
use std::path::Path;

pub fn handle(path: &Path, operation_type: &str, summary: &str) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root);

    if !config.tracks_operations() {
        tracing::debug!("operation tracking disabled; ignoring {}", operation_type);
        return Ok(());
    }

    let db_path = config.history_db_path(&root);
    let store = HistoryStore::open(&db_path)
        .with_context(|| format!("Failed to open history at {}", db_path.display()))?;
    store.append_operation(operation_type, summary)?;
    store.trim(config.history.max_entries)?;
    Ok(())
}
