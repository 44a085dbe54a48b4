use super::resolve_root;
use crate::types::OutputFormat;
use crate::views::{self, Palette};
use anyhow::Result;
use cck_runtime::ConfigTemplate;
use std::path::Path;

pub fn handle(
    path: &Path,
    template: ConfigTemplate,
    at_root: bool,
    force: bool,
    format: OutputFormat,
) -> Result<()> {
    let root = resolve_root(path)?;
    let written = template.write(&root, !at_root, force)?;

    match format {
        OutputFormat::Plain => views::sync::print_created_config(&Palette::detect(), &written),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "config": written }))?
        ),
    }
    Ok(())
}
