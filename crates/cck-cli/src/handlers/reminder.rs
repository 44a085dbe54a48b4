use super::resolve_root;
use anyhow::Result;
use cck_runtime::{Config, reminder};
use std::path::Path;

/// Prints nothing when there is no reminder; hooks treat empty output as
/// "inject nothing".
pub fn handle(path: &Path) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root);

    if let Some(text) = reminder::build(&config, &root) {
        println!("{}", text);
    }
    Ok(())
}
