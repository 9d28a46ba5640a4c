//! repomix invocation through npx (or `npm exec`).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::{RepomixConfig, DEFAULT_TOP_FILES_LENGTH};
use crate::env::NodeLauncher;
use crate::target::Target;
use crate::tools::process::stream;

/// Options forwarded to repomix, independent of where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepomixOptions {
    pub include_patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub include_file_summary: bool,
    pub include_directory_structure: bool,
    pub show_line_numbers: bool,
    pub output_parsable_format: bool,
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub top_files_length: usize,
    pub header_text: Option<String>,
}

impl From<&RepomixConfig> for RepomixOptions {
    fn from(cfg: &RepomixConfig) -> Self {
        Self {
            include_patterns: cfg.include_patterns.clone(),
            ignore_patterns: cfg.ignore_patterns.clone(),
            include_file_summary: cfg.include_file_summary,
            include_directory_structure: cfg.include_directory_structure,
            show_line_numbers: cfg.show_line_numbers,
            output_parsable_format: cfg.output_parsable_format,
            remove_comments: cfg.remove_comments,
            remove_empty_lines: cfg.remove_empty_lines,
            top_files_length: cfg.top_files_length,
            header_text: cfg.header_text.clone().filter(|h| !h.is_empty()),
        }
    }
}

impl Default for RepomixOptions {
    fn default() -> Self {
        Self::from(&RepomixConfig::default())
    }
}

/// A completed repomix run.
#[derive(Debug, Clone)]
pub struct RepomixRun {
    pub output_file: PathBuf,
    /// Size of the generated file, if repomix produced one.
    pub size_bytes: Option<u64>,
}

/// `<output_dir>/<base>_repomix_<timestamp>.md`, absolute so it does not
/// depend on repomix's working directory.
pub fn output_file_path(target: &Target, output_dir: &Path, timestamp: &str) -> Result<PathBuf> {
    let file = output_dir.join(format!("{}_repomix_{timestamp}.md", target.repomix_base_name()));
    std::path::absolute(&file)
        .with_context(|| format!("failed to resolve output path {}", file.display()))
}

/// Arguments after the launcher prefix, starting with the package name.
///
/// Output is always Markdown and never compressed.
pub fn build_args(target: &Target, output_file: &Path, options: &RepomixOptions) -> Vec<String> {
    let mut args = vec!["repomix".to_string()];

    match target {
        Target::Remote(remote) => {
            args.push("--remote".to_string());
            args.push(remote.spec().to_string());
        }
        Target::Local(path) => args.push(path.display().to_string()),
    }

    args.extend(["--style", "markdown"].map(String::from));
    args.push("--output".to_string());
    args.push(output_file.display().to_string());

    if !options.include_patterns.is_empty() {
        args.push("--include".to_string());
        args.push(options.include_patterns.join(","));
    }
    if !options.ignore_patterns.is_empty() {
        args.push("--ignore".to_string());
        args.push(options.ignore_patterns.join(","));
    }

    let toggles = [
        (!options.include_file_summary, "--no-file-summary"),
        (!options.include_directory_structure, "--no-directory-structure"),
        (options.show_line_numbers, "--output-show-line-numbers"),
        (options.output_parsable_format, "--parsable-style"),
        (options.remove_comments, "--remove-comments"),
        (options.remove_empty_lines, "--remove-empty-lines"),
    ];
    args.extend(toggles.iter().filter(|(on, _)| *on).map(|(_, flag)| flag.to_string()));

    if options.top_files_length != DEFAULT_TOP_FILES_LENGTH {
        args.push("--top-files-len".to_string());
        args.push(options.top_files_length.to_string());
    }
    if let Some(header) = &options.header_text {
        args.push("--header-text".to_string());
        args.push(header.clone());
    }

    args
}

/// Directory repomix runs in: the target itself, or its parent for files.
pub fn working_dir(target: &Target) -> Option<PathBuf> {
    match target {
        Target::Remote(_) => None,
        Target::Local(path) if path.is_dir() => Some(path.clone()),
        Target::Local(path) => path.parent().map(Path::to_path_buf),
    }
}

/// Run repomix with inherited stdio and report the generated file.
pub fn run_repomix(
    launcher: &NodeLauncher,
    target: &Target,
    output_dir: &Path,
    options: &RepomixOptions,
    timestamp: &str,
) -> Result<RepomixRun> {
    let output_file = output_file_path(target, output_dir, timestamp)?;

    let mut cmd = launcher.command();
    cmd.args(build_args(target, &output_file, options));
    if let Some(dir) = working_dir(target) {
        cmd.current_dir(dir);
    }

    let status = stream(cmd)?;
    if !status.success() {
        anyhow::bail!("repomix command failed: {status}");
    }

    let size_bytes = std::fs::metadata(&output_file).ok().map(|m| m.len());
    Ok(RepomixRun { output_file, size_bytes })
}
