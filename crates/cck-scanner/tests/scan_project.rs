use cck_scanner::scan_project;
use cck_types::ProjectType;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_detect_python_project() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pyproject.toml", "[project]\nname = 'test'");
    write(dir.path(), "main.py", "print('hello')");

    let context = scan_project(dir.path());

    assert_eq!(context.project_type, ProjectType::Python);
    assert!(context.languages.contains(&"Python".to_string()));
    assert!(context.entry_points.contains(&"main.py".to_string()));
    assert!(context.build_commands.contains(&"pytest".to_string()));
}

#[test]
fn test_detect_node_project() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "package.json",
        r#"{"name": "test", "scripts": {"build": "tsc"}}"#,
    );
    write(dir.path(), "index.js", "console.log('hello')");

    let context = scan_project(dir.path());

    assert_eq!(context.project_type, ProjectType::Node);
    assert!(
        context
            .languages
            .contains(&"JavaScript/TypeScript".to_string())
    );
    assert!(context.build_commands.contains(&"npm run build".to_string()));
    assert_eq!(context.entry_points, vec!["index.js"]);
}

#[test]
fn test_find_key_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "README.md", "# Test");
    write(dir.path(), "Dockerfile", "FROM python:3.12");

    let context = scan_project(dir.path());

    let key_paths: Vec<&str> = context.key_files.iter().map(|kf| kf.path.as_str()).collect();
    assert_eq!(key_paths, vec!["README.md", "Dockerfile"]);
    assert_eq!(context.project_type, ProjectType::Unknown);
}

#[test]
fn test_build_structure() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/main.py", "");
    write(dir.path(), "tests/test_main.py", "");

    let context = scan_project(dir.path());

    assert!(context.structure.contains(&"src/".to_string()));
    assert!(context.structure.iter().any(|line| line.contains("tests/")));
}

#[test]
fn test_ignore_venv() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "pyproject.toml", "[project]\nname = 'test'");
    write(dir.path(), "main.py", "print('hello')");
    write(
        dir.path(),
        ".venv/lib/python3/site-packages/pkg/main.py",
        "# should be ignored",
    );

    let context = scan_project(dir.path());

    assert_eq!(context.entry_points, vec!["main.py"]);
}

#[test]
fn test_project_name_is_directory_name() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("my-service");
    fs::create_dir(&project).unwrap();

    let context = scan_project(&project);

    assert_eq!(context.project_name, "my-service");
}

#[test]
fn test_rust_project() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Cargo.toml", "[package]\nname = \"x\"\n");
    write(dir.path(), "src/main.rs", "fn main() {}");
    write(dir.path(), "tests/cli.rs", "");
    write(dir.path(), "target/debug/build/src/main.rs", "");

    let context = scan_project(dir.path());

    assert_eq!(context.project_type, ProjectType::Rust);
    assert_eq!(context.entry_points, vec!["src/main.rs"]);
    assert_eq!(context.test_patterns, vec!["tests/*.rs"]);
    assert_eq!(context.build_commands, vec!["cargo build", "cargo test"]);
    assert!(context.structure.iter().all(|l| !l.starts_with("target")));
}
