use super::resolve_root;
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use cck_index::{HistoryFormat, HistoryStore, render};
use cck_runtime::Config;
use std::path::Path;

pub fn handle(
    path: &Path,
    limit: Option<usize>,
    style: Option<HistoryFormat>,
    format: OutputFormat,
) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root);
    let db_path = config.history_db_path(&root);
    let limit = limit.unwrap_or(config.reminder.history_limit);

    let records = if db_path.exists() {
        let store = HistoryStore::open(&db_path)
            .with_context(|| format!("Failed to open history at {}", db_path.display()))?;
        store.combined_history(limit)?
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Plain if records.is_empty() => println!("No history recorded yet"),
        OutputFormat::Plain => {
            let style = style.unwrap_or(config.reminder.format);
            println!("{}", render::render(style, &records));
        }
    }
    Ok(())
}
