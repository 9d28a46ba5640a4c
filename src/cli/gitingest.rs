//! Gitingest command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{merge_gitingest, GitingestOverrides};
use crate::domain::Config;
use crate::env::PythonEnv;
use crate::output::create_output_dir;
use crate::target::Target;
use crate::tools::{run_gitingest, GitingestRun};
use crate::utils::timestamp;

#[derive(Args)]
pub struct GitingestArgs {
    /// Local path, repository URL, or GitHub user/repo shorthand
    #[arg(value_name = "PATH")]
    pub target: Option<String>,

    /// Path to analyze (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,

    /// Output directory for results
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only generate JSON output
    #[arg(long)]
    pub json_only: bool,
}

impl GitingestArgs {
    fn overrides(self) -> GitingestOverrides {
        GitingestOverrides {
            path: self.target.or(self.path),
            output: self.output,
            json_only: super::utils::flag(self.json_only),
        }
    }
}

pub fn run(args: GitingestArgs, config: &Config) -> Result<()> {
    let settings = merge_gitingest(config.gitingest.clone(), args.overrides());

    let target = Target::resolve(&settings.path)?;
    create_output_dir(&settings.output)?;

    println!("Running gitingest analysis on: {target}");
    println!("Output directory: {}", settings.output.display());

    let run = execute(config, &target, &settings.output, settings.json_only)
        .context("failed to run gitingest analysis")?;
    print_run(&run);

    println!("✅ Gitingest analysis completed successfully!");
    Ok(())
}

/// Verify the venv, then run gitingest behind a spinner.
pub(super) fn execute(
    config: &Config,
    target: &Target,
    output_dir: &Path,
    json_only: bool,
) -> Result<GitingestRun> {
    let venv = PythonEnv::locate(config.python.venv_path.as_deref())?;
    venv.ensure_python().context("Python is not available")?;
    venv.ensure_gitingest().context("gitingest is not available")?;

    if let Some(notice) = remote_notice(target) {
        println!("{notice}");
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("gitingest is parsing the repository...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = run_gitingest(&venv, target, output_dir, json_only, timestamp());
    spinner.finish_and_clear();
    result
}

fn remote_notice(target: &Target) -> Option<String> {
    target
        .is_remote()
        .then(|| format!("🌐 Attempting to analyze remote repository with gitingest: {target}"))
}

pub(super) fn print_run(run: &GitingestRun) {
    for file in &run.files {
        println!("✅ {} saved to: {}", file.kind.label(), file.path.display());
    }

    let stats = &run.results.stats;
    println!();
    println!("{}", style("📊 Analysis Summary:").bold());
    println!("   Target: {}", run.results.target_path);
    println!("   Summary: {} lines", stats.summary_lines);
    println!("   Tree: {} lines", stats.tree_lines);
    println!("   Content: {} lines ({} characters)", stats.content_lines, stats.content_size);
}
