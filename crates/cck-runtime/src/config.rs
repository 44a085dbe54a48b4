use crate::{Error, Result};
use cck_index::HistoryFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Searched in order, relative to the project root.
pub const CONFIG_LOCATIONS: &[&str] = &[".claude/cck.toml", "cck.toml"];

pub const DEFAULT_DB_PATH: &str = ".claude/cck_history.sqlite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSource {
    /// History when it is enabled and non-empty, otherwise the reminder file.
    #[default]
    Auto,
    History,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Directories to poll, relative to the project root.
    pub paths: Vec<String>,
    /// Path segments or path suffixes skipped by the detector.
    pub exclude: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: vec![".".to_string()],
            exclude: [
                ".git",
                "node_modules",
                "__pycache__",
                ".venv",
                "venv",
                "target",
                DEFAULT_DB_PATH,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub file_changes: bool,
    pub tool_operations: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            file_changes: true,
            tool_operations: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub db_path: String,
    pub max_entries: usize,
    pub track: TrackConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            db_path: DEFAULT_DB_PATH.to_string(),
            max_entries: 50,
            track: TrackConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub source: ReminderSource,
    pub file_path: String,
    pub history_limit: usize,
    pub format: HistoryFormat,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            source: ReminderSource::Auto,
            file_path: ".claude/reminder.md".to_string(),
            history_limit: 20,
            format: HistoryFormat::Compact,
        }
    }
}

/// Project configuration. Built once and passed into each component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub watch: WatchConfig,
    pub history: HistoryConfig,
    pub reminder: ReminderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            watch: WatchConfig::default(),
            history: HistoryConfig::default(),
            reminder: ReminderConfig::default(),
        }
    }
}

impl Config {
    /// Load the project's config, falling back to defaults when the file is
    /// missing or unusable.
    pub fn load(root: &Path) -> Self {
        let Some(path) = Self::find_path(root) else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unusable config, using defaults");
                Self::default()
            }
        }
    }

    pub fn find_path(root: &Path) -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|rel| root.join(rel))
            .find(|path| path.is_file())
    }

    /// Strict load: the user's table is deep-merged over the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let user: toml::Table = toml::from_str(&content)?;

        let mut base: toml::Table = toml::from_str(&toml::to_string(&Self::default())?)?;
        deep_merge(&mut base, user);

        Ok(toml::from_str(&toml::to_string(&base)?)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn history_db_path(&self, root: &Path) -> PathBuf {
        root.join(&self.history.db_path)
    }

    pub fn reminder_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.reminder.file_path)
    }

    /// Detector events are persisted only when both switches are on.
    pub fn tracks_file_changes(&self) -> bool {
        self.history.enabled && self.history.track.file_changes
    }

    pub fn tracks_operations(&self) -> bool {
        self.history.enabled && self.history.track.tool_operations
    }
}

/// Tables merge key by key; any other value in `overlay` replaces the base.
fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) =
            (base.get_mut(&key), &value)
        {
            deep_merge(existing, incoming.clone());
            continue;
        }
        base.insert(key, value);
    }
}

const TEMPLATE_MINIMAL: &str = r#"# cck configuration

version = 1

[reminder]
source = "file"
file_path = ".claude/reminder.md"
"#;

const TEMPLATE_WORKFLOW: &str = r#"# cck configuration (history-backed workflow)
# Suited to long sessions on larger projects.

version = 1

[watch]
paths = ["."]
exclude = [".git", "node_modules", "__pycache__", ".venv", "venv", "target"]

[history]
enabled = true
db_path = ".claude/cck_history.sqlite"
max_entries = 50

[history.track]
file_changes = true

[reminder]
source = "history"
history_limit = 20
format = "compact"
"#;

/// Starter files written by `cck init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigTemplate {
    #[default]
    Minimal,
    Workflow,
}

impl ConfigTemplate {
    pub fn contents(&self) -> &'static str {
        match self {
            ConfigTemplate::Minimal => TEMPLATE_MINIMAL,
            ConfigTemplate::Workflow => TEMPLATE_WORKFLOW,
        }
    }

    /// Where `init` writes: `.claude/cck.toml`, or `cck.toml` at the root.
    pub fn target_path(root: &Path, in_claude_dir: bool) -> PathBuf {
        if in_claude_dir {
            root.join(CONFIG_LOCATIONS[0])
        } else {
            root.join(CONFIG_LOCATIONS[1])
        }
    }

    pub fn write(&self, root: &Path, in_claude_dir: bool, force: bool) -> Result<PathBuf> {
        let path = Self::target_path(root, in_claude_dir);
        if path.exists() && !force {
            return Err(Error::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.contents())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, rel: &str, body: &str) -> PathBuf {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.watch.paths, vec!["."]);
        assert!(config.watch.exclude.contains(&DEFAULT_DB_PATH.to_string()));
        assert!(!config.history.enabled);
        assert_eq!(config.history.max_entries, 50);
        assert!(config.history.track.file_changes);
        assert!(!config.history.track.tool_operations);
        assert_eq!(config.reminder.source, ReminderSource::Auto);
        assert_eq!(config.reminder.history_limit, 20);
        assert_eq!(config.reminder.format, HistoryFormat::Compact);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(Config::load(temp_dir.path()), Config::default());
    }

    #[test]
    fn test_nested_values_merge_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        write_config(
            temp_dir.path(),
            "cck.toml",
            "[history]\nenabled = true\n[history.track]\ntool_operations = true\n",
        );

        let config = Config::load(temp_dir.path());

        assert!(config.history.enabled);
        assert!(config.history.track.tool_operations);
        assert!(config.history.track.file_changes);
        assert_eq!(config.history.db_path, DEFAULT_DB_PATH);
        assert_eq!(config.reminder, ReminderConfig::default());
    }

    #[test]
    fn test_lists_replace_rather_than_append() {
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), "cck.toml", "[watch]\nexclude = [\"dist\"]\n");

        let config = Config::load(temp_dir.path());

        assert_eq!(config.watch.exclude, vec!["dist"]);
        assert_eq!(config.watch.paths, vec!["."]);
    }

    #[test]
    fn test_claude_dir_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        write_config(temp_dir.path(), "cck.toml", "[reminder]\nsource = \"file\"\n");
        write_config(
            temp_dir.path(),
            ".claude/cck.toml",
            "[reminder]\nsource = \"history\"\n",
        );

        let config = Config::load(temp_dir.path());
        assert_eq!(config.reminder.source, ReminderSource::History);
    }

    #[test]
    fn test_malformed_or_ill_typed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(temp_dir.path(), "cck.toml", "[history\nenabled = ");
        assert!(Config::load_from(&path).is_err());
        assert_eq!(Config::load(temp_dir.path()), Config::default());

        write_config(temp_dir.path(), "cck.toml", "[history]\nmax_entries = \"many\"\n");
        assert_eq!(Config::load(temp_dir.path()), Config::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        write_config(
            temp_dir.path(),
            "cck.toml",
            "colour = \"blue\"\n[watch]\nenabled = true\n",
        );

        assert_eq!(Config::load(temp_dir.path()), Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("cck.toml");

        let mut config = Config::default();
        config.history.enabled = true;
        config.reminder.format = HistoryFormat::Detailed;
        config.save_to(&path)?;

        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_templates_parse_to_expected_config() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let path = ConfigTemplate::Minimal.write(temp_dir.path(), true, false)?;
        assert_eq!(path, temp_dir.path().join(".claude/cck.toml"));
        let minimal = Config::load(temp_dir.path());
        assert_eq!(minimal.reminder.source, ReminderSource::File);
        assert!(!minimal.history.enabled);

        ConfigTemplate::Workflow.write(temp_dir.path(), true, true)?;
        let workflow = Config::load(temp_dir.path());
        assert!(workflow.tracks_file_changes());
        assert!(!workflow.tracks_operations());
        assert_eq!(workflow.reminder.source, ReminderSource::History);
        Ok(())
    }

    #[test]
    fn test_template_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        ConfigTemplate::Minimal
            .write(temp_dir.path(), false, false)
            .unwrap();

        let err = ConfigTemplate::Workflow
            .write(temp_dir.path(), false, false)
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
