//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated project directory
//! - Placing files with controlled modification times
//! - Executing CLI commands inside the project

use anyhow::{Context, Result};
use assert_cmd::Command;
use filetime::{FileTime, set_file_mtime};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use cck_testing::TestWorld;
///
/// let world = TestWorld::new()
///     .with_file("pyproject.toml", "[project]\nname = 'demo'\n")
///     .with_file("main.py", "print('hi')\n");
///
/// let result = world.run(&["sync"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    project: PathBuf,
    cwd: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with an empty `project/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(&project).expect("Failed to create project dir");

        Self {
            cwd: project.clone(),
            project,
            temp_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Get the project directory path.
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Change the working directory (relative to the temp root).
    pub fn enter_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        let new_cwd = self.temp_dir.path().join(path);
        std::fs::create_dir_all(&new_cwd).expect("Failed to create directory");
        self.cwd = new_cwd;
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Create a file in the project.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.write_file(rel, content).expect("Failed to write file");
        self
    }

    /// Create a file in the project with a fixed modification time.
    pub fn with_file_at(self, rel: &str, content: &str, unix_secs: i64) -> Self {
        self.write_file_at(rel, content, unix_secs)
            .expect("Failed to write file");
        self
    }

    /// Write `.claude/cck.toml`.
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file(".claude/cck.toml", toml)
    }

    /// Write a project file without consuming the world.
    pub fn write_file(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.project.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a project file and pin its modification time.
    pub fn write_file_at(&self, rel: &str, content: &str, unix_secs: i64) -> Result<PathBuf> {
        let path = self.write_file(rel, content)?;
        set_file_mtime(&path, FileTime::from_unix_time(unix_secs, 0))?;
        Ok(path)
    }

    /// Read a project file.
    pub fn read_file(&self, rel: &str) -> Result<String> {
        let path = self.project.join(rel);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn file_exists(&self, rel: &str) -> bool {
        self.project.join(rel).exists()
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(&self.cwd).env("NO_COLOR", "1");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Build a `std::process::Command` for long-running use with
    /// [`crate::process::BackgroundProcess`].
    #[allow(deprecated)]
    pub fn std_command(&self, args: &[&str]) -> Result<std::process::Command> {
        use assert_cmd::cargo::CommandCargoExt;

        let mut cmd = std::process::Command::cargo_bin("cck")
            .map_err(|e| anyhow::anyhow!("Failed to find cck binary: {}", e))?;
        cmd.current_dir(&self.cwd).env("NO_COLOR", "1").args(args);
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        Ok(cmd)
    }

    /// Execute the CLI and capture its output.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built (cargo test does this for the package that owns it).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("cck")
            .map_err(|e| anyhow::anyhow!("Failed to find cck binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
