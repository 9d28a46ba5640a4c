//! Core configuration types shared by every command.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Default top-files count repomix uses when `--top-files-len` is omitted.
pub const DEFAULT_TOP_FILES_LENGTH: usize = 5;

/// Fully resolved configuration (defaults < file < environment < CLI).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verbose: bool,
    pub python: PythonConfig,
    pub analyze: AnalyzeConfig,
    pub gitingest: GitingestConfig,
    pub repomix: RepomixConfig,
    pub setup: SetupConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Explicit virtual environment directory, bypassing discovery.
    #[serde(alias = "venv-path")]
    pub venv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub path: String,
    #[serde(alias = "output", alias = "output-dir")]
    pub output_dir: PathBuf,
    #[serde(alias = "enable-gitingest")]
    pub enable_gitingest: bool,
    #[serde(alias = "enable-repomix")]
    pub enable_repomix: bool,
    #[serde(alias = "header-text")]
    pub header_text: Option<String>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            output_dir: PathBuf::from("analysis-results"),
            enable_gitingest: true,
            enable_repomix: true,
            header_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitingestConfig {
    pub path: String,
    pub output: PathBuf,
    #[serde(alias = "json-only")]
    pub json_only: bool,
}

impl Default for GitingestConfig {
    fn default() -> Self {
        Self { path: ".".to_string(), output: PathBuf::from("output"), json_only: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepomixConfig {
    pub path: String,
    pub output: PathBuf,
    pub remote: Option<String>,
    #[serde(alias = "include", alias = "include-patterns", deserialize_with = "deserialize_patterns")]
    pub include_patterns: Vec<String>,
    #[serde(alias = "ignore", alias = "ignore-patterns", deserialize_with = "deserialize_patterns")]
    pub ignore_patterns: Vec<String>,
    #[serde(alias = "include-file-summary")]
    pub include_file_summary: bool,
    #[serde(alias = "include-directory-structure")]
    pub include_directory_structure: bool,
    #[serde(alias = "show-line-numbers")]
    pub show_line_numbers: bool,
    #[serde(alias = "output-parsable-format")]
    pub output_parsable_format: bool,
    #[serde(alias = "remove-comments")]
    pub remove_comments: bool,
    #[serde(alias = "remove-empty-lines")]
    pub remove_empty_lines: bool,
    #[serde(alias = "top-files-length")]
    pub top_files_length: usize,
    #[serde(alias = "header-text")]
    pub header_text: Option<String>,
}

impl Default for RepomixConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            output: PathBuf::from("output"),
            remote: None,
            include_patterns: Vec::new(),
            ignore_patterns: Vec::new(),
            include_file_summary: true,
            include_directory_structure: true,
            show_line_numbers: true,
            output_parsable_format: true,
            remove_comments: true,
            remove_empty_lines: true,
            top_files_length: DEFAULT_TOP_FILES_LENGTH,
            header_text: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    #[serde(alias = "auto-install")]
    pub auto_install: bool,
    pub quiet: bool,
    #[serde(alias = "skip-python")]
    pub skip_python: bool,
    #[serde(alias = "skip-node")]
    pub skip_node: bool,
    #[serde(alias = "force-venv")]
    pub force_venv: bool,
}

/// Split a comma-separated pattern string, trimming and dropping empty parts.
pub fn split_patterns(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}

/// Accept either `"a, b"` or `["a", "b"]` for glob pattern lists.
fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Patterns {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Patterns>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Patterns::One(raw)) => split_patterns(&raw),
        Some(Patterns::Many(items)) => {
            items.iter().flat_map(|item| split_patterns(item)).collect()
        }
    })
}
