use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary ecosystem of a scanned project, decided from indicator files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Python,
    Node,
    Go,
    Rust,
    Php,
    Ruby,
    #[default]
    Unknown,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Python => "python",
            ProjectType::Node => "node",
            ProjectType::Go => "go",
            ProjectType::Rust => "rust",
            ProjectType::Php => "php",
            ProjectType::Ruby => "ruby",
            ProjectType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notable file at the project root and what it is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    pub path: String,
    pub purpose: String,
}

/// Facts about a codebase gathered by the scanner and rendered into the
/// machine-owned region of the context document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project_name: String,
    pub project_type: ProjectType,
    pub languages: Vec<String>,
    pub entry_points: Vec<String>,
    pub test_patterns: Vec<String>,
    pub build_commands: Vec<String>,
    /// Indented directory tree lines (two spaces per level, `/` suffix on dirs).
    pub structure: Vec<String>,
    pub key_files: Vec<KeyFile>,
    pub conventions: Vec<String>,
}

impl ProjectContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }
}
