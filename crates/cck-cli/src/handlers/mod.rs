pub mod history;
pub mod info;
pub mod init;
pub mod log_op;
pub mod reminder;
pub mod sync;
pub mod watch;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Absolute project root; the directory must exist.
pub(crate) fn resolve_root(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Project path does not exist: {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", root.display());
    }
    Ok(root)
}
