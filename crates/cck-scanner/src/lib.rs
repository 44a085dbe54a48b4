//! Project scanner: derives a [`ProjectContext`] from files on disk.
//!
//! Every probe is best-effort. A manifest that fails to parse or a directory
//! that cannot be read removes only that probe's contribution.

mod commands;
mod detect;
mod layout;
mod walk;

use cck_types::ProjectContext;
use std::path::Path;

pub use walk::IGNORED_DIRS;

/// Scan `root` and collect everything the generator renders.
pub fn scan_project(root: &Path) -> ProjectContext {
    let mut context = ProjectContext::new(project_name(root));

    detect::detect_project_type(root, &mut context);
    detect::find_entry_points(root, &mut context);
    detect::find_test_patterns(root, &mut context);
    commands::extract_build_commands(root, &mut context);
    context.structure = layout::build_structure(root);
    context.key_files = layout::find_key_files(root);
    context.conventions = layout::detect_conventions(root, context.project_type);

    tracing::debug!(
        root = %root.display(),
        project_type = %context.project_type,
        entry_points = context.entry_points.len(),
        "scanned project"
    );

    context
}

fn project_name(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}
