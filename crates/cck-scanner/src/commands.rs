use cck_types::ProjectContext;
use std::fs;
use std::path::Path;

/// Collect build/test commands from manifests at the project root.
pub(crate) fn extract_build_commands(root: &Path, context: &mut ProjectContext) {
    let commands = &mut context.build_commands;

    if let Some(text) = read_manifest(root, "pyproject.toml") {
        match pyproject_commands(&text) {
            Ok(found) => commands.extend(found),
            Err(e) => tracing::debug!(error = %e, "skipping unparsable pyproject.toml"),
        }
    }

    if let Some(text) = read_manifest(root, "package.json") {
        match package_json_commands(&text) {
            Ok(found) => commands.extend(found),
            Err(e) => tracing::debug!(error = %e, "skipping unparsable package.json"),
        }
    }

    if let Some(text) = read_manifest(root, "Makefile") {
        commands.extend(makefile_commands(&text));
    }

    if root.join("Cargo.toml").exists() {
        commands.extend(["cargo build".to_string(), "cargo test".to_string()]);
    }

    if root.join("go.mod").exists() {
        commands.extend(["go build ./...".to_string(), "go test ./...".to_string()]);
    }
}

fn read_manifest(root: &Path, name: &str) -> Option<String> {
    let path = root.join(name);
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unreadable manifest");
            None
        }
    }
}

fn pyproject_commands(text: &str) -> Result<Vec<String>, toml::de::Error> {
    let table: toml::Table = toml::from_str(text)?;

    let mut commands: Vec<String> = table
        .get("project")
        .and_then(|p| p.get("scripts"))
        .and_then(|s| s.as_table())
        .map(|scripts| {
            scripts
                .keys()
                .map(|name| format!("{} (pyproject.toml)", name))
                .collect()
        })
        .unwrap_or_default();

    commands.push("pip install -e .".to_string());
    commands.push("pytest".to_string());
    Ok(commands)
}

fn package_json_commands(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    Ok(value
        .get("scripts")
        .and_then(|s| s.as_object())
        .map(|scripts| {
            scripts
                .keys()
                .map(|name| format!("npm run {}", name))
                .collect()
        })
        .unwrap_or_default())
}

/// Rule heads: unindented lines with a `:`, skipping dot-targets like `.PHONY`.
fn makefile_commands(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('\t'))
        .filter_map(|line| line.split_once(':'))
        .map(|(target, _)| target.trim())
        .filter(|target| !target.is_empty() && !target.starts_with('.'))
        .map(|target| format!("make {}", target))
        .collect()
}
