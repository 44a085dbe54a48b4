use crate::walk::{IGNORED_DIRS, project_files};
use cck_types::{KeyFile, ProjectType};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

const STRUCTURE_MAX_DEPTH: usize = 2;
const STRUCTURE_MAX_LINES: usize = 50;
const NAMING_SAMPLE: usize = 20;

const KEY_FILES: &[(&str, &str)] = &[
    ("README.md", "Project documentation"),
    ("CLAUDE.md", "Claude Code context (existing)"),
    ("pyproject.toml", "Python project config"),
    ("package.json", "Node.js project config"),
    ("Cargo.toml", "Rust crate manifest"),
    ("Makefile", "Build automation"),
    (".env.example", "Environment variables template"),
    ("docker-compose.yml", "Docker services"),
    ("Dockerfile", "Container definition"),
];

const LINTER_CONFIGS: &[(&str, &str)] = &[
    (".pylintrc", "Pylint"),
    ("pyproject.toml", "Ruff/Black (check toml)"),
    (".eslintrc.js", "ESLint"),
    (".eslintrc.json", "ESLint"),
    (".prettierrc", "Prettier"),
    ("rustfmt.toml", "rustfmt"),
    ("clippy.toml", "Clippy"),
];

fn is_hidden_or_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.iter().any(|d| name == *d)
}

/// Indented tree of the top levels: directories first, then files, each
/// group alphabetical.
pub(crate) fn build_structure(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(STRUCTURE_MAX_DEPTH + 1)
        .follow_links(false)
        .sort_by(|a, b| {
            (!a.file_type().is_dir(), a.file_name()).cmp(&(!b.file_type().is_dir(), b.file_name()))
        })
        .into_iter()
        .filter_entry(|e| !is_hidden_or_ignored(e))
        .filter_map(|e| e.ok())
        .map(|e| {
            let indent = "  ".repeat(e.depth() - 1);
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() {
                format!("{}{}/", indent, name)
            } else {
                format!("{}{}", indent, name)
            }
        })
        .take(STRUCTURE_MAX_LINES)
        .collect()
}

pub(crate) fn find_key_files(root: &Path) -> Vec<KeyFile> {
    KEY_FILES
        .iter()
        .filter(|(path, _)| root.join(path).exists())
        .map(|(path, purpose)| KeyFile {
            path: path.to_string(),
            purpose: purpose.to_string(),
        })
        .collect()
}

pub(crate) fn detect_conventions(root: &Path, project_type: ProjectType) -> Vec<String> {
    let mut conventions: Vec<String> = LINTER_CONFIGS
        .iter()
        .filter(|(file, _)| root.join(file).exists())
        .map(|(_, linter)| format!("{} configured", linter))
        .collect();
    conventions.dedup();

    if project_type == ProjectType::Python && uses_snake_case_files(root) {
        conventions.push("snake_case file naming".to_string());
    }

    conventions
}

/// Majority of the first sampled `.py` files have lowercase stems with an
/// underscore.
fn uses_snake_case_files(root: &Path) -> bool {
    let stems: Vec<String> = project_files(root)
        .filter(|p| p.extension().is_some_and(|ext| ext == "py"))
        .take(NAMING_SAMPLE)
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();

    let snake = stems.iter().filter(|s| is_snake_case(s)).count();
    snake * 2 > stems.len()
}

fn is_snake_case(stem: &str) -> bool {
    stem.contains('_')
        && stem.chars().any(char::is_alphabetic)
        && !stem.chars().any(char::is_uppercase)
}
