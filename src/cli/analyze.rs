//! Analyze command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::utils::toggle;
use super::{gitingest, repomix};
use crate::config::{merge_analyze, AnalyzeOverrides};
use crate::domain::{AnalyzeConfig, Config};
use crate::error::AnalyzerError;
use crate::output::create_output_dir;
use crate::target::Target;
use crate::tools::RepomixOptions;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Local path, repository URL, or GitHub user/repo shorthand
    #[arg(value_name = "PATH")]
    pub target: Option<String>,

    /// Path to analyze (default: current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,

    /// Output directory for results (default: analysis-results)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Enable gitingest analysis
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true, conflicts_with = "disable_gitingest")]
    pub enable_gitingest: Option<bool>,

    /// Disable gitingest analysis
    #[arg(long)]
    pub disable_gitingest: bool,

    /// Enable repomix analysis
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true", require_equals = true, conflicts_with = "disable_repomix")]
    pub enable_repomix: Option<bool>,

    /// Disable repomix analysis
    #[arg(long)]
    pub disable_repomix: bool,

    /// Custom header text for the repomix output
    #[arg(long, value_name = "TEXT")]
    pub header_text: Option<String>,
}

impl AnalyzeArgs {
    fn overrides(self) -> AnalyzeOverrides {
        AnalyzeOverrides {
            path: self.target.or(self.path),
            output_dir: self.output,
            enable_gitingest: toggle(self.enable_gitingest, self.disable_gitingest),
            enable_repomix: toggle(self.enable_repomix, self.disable_repomix),
            header_text: self.header_text,
        }
    }
}

/// repomix options for an analyze run: the repomix section, with the
/// analyze header taking precedence.
fn repomix_options(settings: &AnalyzeConfig, config: &Config) -> RepomixOptions {
    let mut options = RepomixOptions::from(&config.repomix);
    if let Some(header) = settings.header_text.as_ref().filter(|h| !h.is_empty()) {
        options.header_text = Some(header.clone());
    }
    options
}

pub fn run(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let settings = merge_analyze(config.analyze.clone(), args.overrides());

    if !settings.enable_gitingest && !settings.enable_repomix {
        return Err(AnalyzerError::NoToolsEnabled.into());
    }

    let target = Target::resolve(&settings.path)?;
    if target.is_remote() {
        println!("🌐 Remote repository detected: {target}");
    }

    create_output_dir(&settings.output_dir)?;

    println!("{}", style("🚀 Starting comprehensive repository analysis...").bold());
    println!("   Target: {}", target.describe());
    println!("   Output directory: {}", settings.output_dir.display());
    println!(
        "   Tools to run: gitingest={}, repomix={}",
        settings.enable_gitingest, settings.enable_repomix
    );

    let mut summary = Vec::new();
    let mut failed = false;

    if settings.enable_gitingest {
        println!();
        println!("{}", style("🔍 Running gitingest analysis...").bold());
        match gitingest::execute(config, &target, &settings.output_dir, false) {
            Ok(run) => {
                gitingest::print_run(&run);
                println!("✅ Gitingest analysis completed successfully!");
                summary.push("✅ Gitingest: SUCCESS - Detailed repository documentation generated");
            }
            Err(err) => {
                println!("{} Gitingest analysis failed: {err:#}", style("❌").red());
                failed = true;
            }
        }
    }

    if settings.enable_repomix {
        println!();
        println!("{}", style("📦 Running repomix analysis...").bold());
        let options = repomix_options(&settings, config);
        match repomix::execute(&target, &settings.output_dir, &options) {
            Ok(run) => {
                repomix::print_run(&run, &target, &options);
                println!("✅ Repomix analysis completed successfully!");
                summary.push("✅ Repomix: SUCCESS - AI-friendly markdown package generated");
            }
            Err(err) => {
                println!("{} Repomix analysis failed: {err:#}", style("❌").red());
                failed = true;
            }
        }
    }

    println!();
    println!("{}", style("📊 Analysis Summary:").bold());
    for line in &summary {
        println!("   {line}");
    }

    if failed {
        anyhow::bail!("analysis completed with errors");
    }

    println!();
    println!(
        "🎉 Repository analysis completed! Results saved to: {}",
        settings.output_dir.display()
    );
    Ok(())
}
