use super::resolve_root;
use crate::types::OutputFormat;
use crate::views::Palette;
use crate::views::info::ProjectInfoView;
use anyhow::Result;
use cck_scanner::scan_project;
use std::path::Path;

pub fn handle(path: &Path, format: OutputFormat) -> Result<()> {
    let root = resolve_root(path)?;
    let context = scan_project(&root);

    match format {
        OutputFormat::Plain => print!("{}", ProjectInfoView::new(&context, Palette::detect())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&context)?),
    }
    Ok(())
}
