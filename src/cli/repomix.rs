//! Repomix command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use super::utils::parse_csv;
use crate::config::{merge_repomix, RepomixOverrides};
use crate::domain::{Config, RepomixConfig};
use crate::env::NodeLauncher;
use crate::output::create_output_dir;
use crate::target::{RemoteRepo, Target};
use crate::tools::{run_repomix, RepomixOptions, RepomixRun};
use crate::utils::{format_file_size, timestamp};

#[derive(Args)]
pub struct RepomixArgs {
    /// Local path, repository URL, or GitHub user/repo shorthand
    #[arg(value_name = "PATH")]
    pub target: Option<String>,

    /// Path to analyze (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,

    /// Output directory for results
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Remote repository URL or user/repo shorthand
    #[arg(short, long, value_name = "URL")]
    pub remote: Option<String>,

    /// Comma-separated glob patterns to include
    #[arg(long, value_name = "GLOBS")]
    pub include: Option<String>,

    /// Comma-separated glob patterns to ignore
    #[arg(long, value_name = "GLOBS")]
    pub ignore: Option<String>,

    /// Include file summary section
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub include_file_summary: Option<bool>,

    /// Include directory structure
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub include_directory_structure: Option<bool>,

    /// Show line numbers in output
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub show_line_numbers: Option<bool>,

    /// Use the parsable output style
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub output_parsable_format: Option<bool>,

    /// Remove comments from source files
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub remove_comments: Option<bool>,

    /// Remove empty lines from source files
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub remove_empty_lines: Option<bool>,

    /// Number of largest files to list in the summary
    #[arg(long, value_name = "N")]
    pub top_files_length: Option<usize>,

    /// Custom header text for the packed output
    #[arg(long, value_name = "TEXT")]
    pub header_text: Option<String>,
}

impl RepomixArgs {
    fn overrides(self) -> RepomixOverrides {
        RepomixOverrides {
            include_patterns: parse_csv(&self.include),
            ignore_patterns: parse_csv(&self.ignore),
            path: self.target.or(self.path),
            output: self.output,
            remote: self.remote,
            include_file_summary: self.include_file_summary,
            include_directory_structure: self.include_directory_structure,
            show_line_numbers: self.show_line_numbers,
            output_parsable_format: self.output_parsable_format,
            remove_comments: self.remove_comments,
            remove_empty_lines: self.remove_empty_lines,
            top_files_length: self.top_files_length,
            header_text: self.header_text,
        }
    }
}

fn settings_target(settings: &RepomixConfig) -> Result<Target> {
    match settings.remote.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(remote) => Ok(Target::Remote(RemoteRepo::new(remote.trim()))),
        None => Target::resolve(&settings.path),
    }
}

pub fn run(args: RepomixArgs, config: &Config) -> Result<()> {
    let settings = merge_repomix(config.repomix.clone(), args.overrides());

    let target = settings_target(&settings)?;
    create_output_dir(&settings.output)?;

    println!("Running repomix analysis on: {target}");
    println!("Output directory: {}", settings.output.display());

    let options = RepomixOptions::from(&settings);
    let run = execute(&target, &settings.output, &options).context("failed to run repomix")?;
    print_run(&run, &target, &options);

    println!("✅ Repomix analysis completed successfully!");
    Ok(())
}

/// Find a Node launcher and run repomix with streamed output.
pub(super) fn execute(target: &Target, output_dir: &Path, options: &RepomixOptions) -> Result<RepomixRun> {
    let launcher = NodeLauncher::detect()?;
    tracing::debug!("Launching repomix via {}", launcher.name());
    run_repomix(&launcher, target, output_dir, options, &timestamp())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Results block for a run; empty when repomix left no output file.
fn result_lines(run: &RepomixRun, target: &Target, options: &RepomixOptions) -> Vec<String> {
    let Some(size) = run.size_bytes else {
        return Vec::new();
    };

    let mut lines = vec![
        format!("   Output file: {}", run.output_file.display()),
        format!("   File size: {} ({size} bytes)", format_file_size(size)),
        match target {
            Target::Remote(remote) => format!("   Remote repository: {}", remote.spec()),
            Target::Local(path) => format!("   Local path: {}", path.display()),
        },
        "   Format: Markdown".to_string(),
    ];

    if !options.include_patterns.is_empty() {
        lines.push(format!("   Include patterns: {}", options.include_patterns.join(", ")));
    }
    if !options.ignore_patterns.is_empty() {
        lines.push(format!("   Ignore patterns: {}", options.ignore_patterns.join(", ")));
    }
    lines.push(format!(
        "   Options: file summary {}, directory structure {}, line numbers {}, parsable format {}",
        yes_no(options.include_file_summary),
        yes_no(options.include_directory_structure),
        yes_no(options.show_line_numbers),
        yes_no(options.output_parsable_format),
    ));
    lines.push(format!(
        "   Processing: remove comments {}, remove empty lines {}, top files {}",
        yes_no(options.remove_comments),
        yes_no(options.remove_empty_lines),
        options.top_files_length,
    ));
    lines
}

pub(super) fn print_run(run: &RepomixRun, target: &Target, options: &RepomixOptions) {
    let lines = result_lines(run, target, options);
    if lines.is_empty() {
        tracing::warn!("repomix output file not found: {}", run.output_file.display());
        return;
    }

    println!();
    println!("{}", style("📊 Analysis Results:").bold());
    for line in lines {
        println!("{line}");
    }
}
