use super::resolve_root;
use crate::types::OutputFormat;
use crate::views::{self, Palette};
use anyhow::{Context, Result};
use cck_runtime::{ContextSource, ScannerSource, merged_document, sync_document};
use std::path::Path;

pub fn handle(path: &Path, output: &str, dry_run: bool, format: OutputFormat) -> Result<()> {
    let root = resolve_root(path)?;
    let output_path = root.join(output);
    let palette = Palette::detect();

    if format == OutputFormat::Plain {
        views::sync::print_scanning(&palette, &root);
    }

    let region = ScannerSource
        .generate(&root)
        .context("Failed to generate project context")?;

    if dry_run {
        let (_, merged) = merged_document(&output_path, &region)
            .with_context(|| format!("Failed to read {}", output_path.display()))?;
        match format {
            OutputFormat::Plain => views::sync::print_preview(&palette, &merged),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "output": output_path,
                    "dry_run": true,
                    "document": merged,
                }))?
            ),
        }
        return Ok(());
    }

    let written = sync_document(&output_path, &region)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    tracing::info!(path = %output_path.display(), written, "sync finished");

    match format {
        OutputFormat::Plain => views::sync::print_result(&palette, &output_path, written),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "output": output_path,
                "dry_run": false,
                "written": written,
            }))?
        ),
    }
    Ok(())
}
