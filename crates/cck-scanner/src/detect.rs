use crate::walk::project_files;
use cck_types::{ProjectContext, ProjectType};
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

/// Checked in order; a later hit overrides the type of an earlier one.
const TYPE_INDICATORS: &[(&str, ProjectType, &str)] = &[
    ("pyproject.toml", ProjectType::Python, "Python"),
    ("setup.py", ProjectType::Python, "Python"),
    ("requirements.txt", ProjectType::Python, "Python"),
    ("package.json", ProjectType::Node, "JavaScript/TypeScript"),
    ("go.mod", ProjectType::Go, "Go"),
    ("Cargo.toml", ProjectType::Rust, "Rust"),
    ("composer.json", ProjectType::Php, "PHP"),
    ("Gemfile", ProjectType::Ruby, "Ruby"),
];

const MAX_ENTRY_POINTS_PER_PATTERN: usize = 3;

pub(crate) fn detect_project_type(root: &Path, context: &mut ProjectContext) {
    for (file, project_type, language) in TYPE_INDICATORS {
        if root.join(file).exists() {
            context.project_type = *project_type;
            push_unique(&mut context.languages, language);
        }
    }

    if root.join("tsconfig.json").exists() {
        push_unique(&mut context.languages, "TypeScript");
    }
}

fn entry_patterns(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Python => &["main.py", "app.py", "cli.py", "__main__.py", "run.py"],
        ProjectType::Node => &[
            "index.js",
            "index.ts",
            "main.js",
            "main.ts",
            "app.js",
            "app.ts",
            "server.js",
            "server.ts",
        ],
        ProjectType::Go => &["main.go", "cmd/main.go"],
        ProjectType::Rust => &["src/main.rs", "src/lib.rs"],
        _ => &[],
    }
}

fn test_patterns(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Python => &["test_*.py", "*_test.py", "tests/*.py"],
        ProjectType::Node => &[
            "*.test.js",
            "*.test.ts",
            "*.spec.js",
            "*.spec.ts",
            "__tests__/*.js",
        ],
        ProjectType::Go => &["*_test.go"],
        ProjectType::Rust => &["tests/*.rs"],
        _ => &[],
    }
}

/// Files whose trailing path components equal an entry pattern, anywhere in
/// the tree.
pub(crate) fn find_entry_points(root: &Path, context: &mut ProjectContext) {
    let patterns = entry_patterns(context.project_type);
    if patterns.is_empty() {
        return;
    }

    let files: Vec<_> = project_files(root).collect();
    for pattern in patterns {
        let found = files
            .iter()
            .filter(|rel| rel.ends_with(pattern))
            .take(MAX_ENTRY_POINTS_PER_PATTERN);
        for rel in found {
            push_unique(&mut context.entry_points, &to_slash(rel));
        }
    }
}

/// Report each test glob that matches at least one file.
pub(crate) fn find_test_patterns(root: &Path, context: &mut ProjectContext) {
    let patterns = test_patterns(context.project_type);
    if patterns.is_empty() {
        return;
    }

    let matchers: Vec<(&str, GlobMatcher)> = patterns
        .iter()
        .filter_map(|p| match anywhere(p) {
            Ok(m) => Some((*p, m)),
            Err(e) => {
                tracing::warn!(pattern = p, error = %e, "invalid test pattern");
                None
            }
        })
        .collect();

    let files: Vec<_> = project_files(root).collect();
    for (pattern, matcher) in &matchers {
        if files.iter().any(|rel| matcher.is_match(rel)) {
            push_unique(&mut context.test_patterns, pattern);
        }
    }
}

/// `pattern` matched at any depth, with `*` confined to one path component.
fn anywhere(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(&format!("**/{}", pattern))
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_later_indicator_wins_type_and_languages_accumulate() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "requirements.txt");
        touch(dir.path(), "package.json");
        touch(dir.path(), "tsconfig.json");

        let mut ctx = ProjectContext::new("x");
        detect_project_type(dir.path(), &mut ctx);

        assert_eq!(ctx.project_type, ProjectType::Node);
        assert_eq!(
            ctx.languages,
            vec!["Python", "JavaScript/TypeScript", "TypeScript"]
        );
    }

    #[test]
    fn test_python_indicators_add_language_once() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pyproject.toml");
        touch(dir.path(), "setup.py");

        let mut ctx = ProjectContext::new("x");
        detect_project_type(dir.path(), &mut ctx);

        assert_eq!(ctx.languages, vec!["Python"]);
    }

    #[test]
    fn test_entry_points_are_capped_per_pattern() {
        let dir = TempDir::new().unwrap();
        for sub in ["a", "b", "c", "d"] {
            touch(dir.path(), &format!("{}/main.py", sub));
        }

        let mut ctx = ProjectContext::new("x");
        ctx.project_type = ProjectType::Python;
        find_entry_points(dir.path(), &mut ctx);

        assert_eq!(ctx.entry_points, vec!["a/main.py", "b/main.py", "c/main.py"]);
    }

    #[test]
    fn test_nested_entry_pattern_matches_whole_components() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "notsrc/main.rs");

        let mut ctx = ProjectContext::new("x");
        ctx.project_type = ProjectType::Rust;
        find_entry_points(dir.path(), &mut ctx);

        assert_eq!(ctx.entry_points, vec!["src/main.rs"]);
    }

    #[test]
    fn test_test_patterns_match_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pkg/test_core.py");
        touch(dir.path(), "node_modules/tests/x.py");

        let mut ctx = ProjectContext::new("x");
        ctx.project_type = ProjectType::Python;
        find_test_patterns(dir.path(), &mut ctx);

        assert_eq!(ctx.test_patterns, vec!["test_*.py"]);
    }

    #[test]
    fn test_star_does_not_cross_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "tests/unit/deep.rs");

        let mut ctx = ProjectContext::new("x");
        ctx.project_type = ProjectType::Rust;
        find_test_patterns(dir.path(), &mut ctx);

        assert!(ctx.test_patterns.is_empty());
    }
}
