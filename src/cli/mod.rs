//! Command-line interface for repo-analyzer
//!
//! Provides `analyze`, `gitingest`, `repomix`, `setup` and `completions`
//! subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

use crate::config::{default_search_dirs, load_config};

mod analyze;
mod completions;
mod gitingest;
mod repomix;
mod setup;
mod utils;

/// A unified tool for analyzing repositories using gitingest and repomix
#[derive(Parser)]
#[command(name = "repo-analyzer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: repo-analyzer.config.yaml in . or $HOME)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run comprehensive repository analysis using both gitingest and repomix
    Analyze(analyze::AnalyzeArgs),

    /// Run gitingest analysis on a repository
    Gitingest(gitingest::GitingestArgs),

    /// Run repomix analysis on a repository
    Repomix(Box<repomix::RepomixArgs>),

    /// Setup and verify environment dependencies for repo-analyzer
    Setup(setup::SetupArgs),

    /// Print a shell completion script
    Completions(completions::CompletionsArgs),
}

fn log_filter(verbose: bool) -> EnvFilter {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(directives.as_deref(), verbose)
}

/// A usable `RUST_LOG` value replaces the default level entirely; otherwise
/// `--verbose` selects DEBUG over WARN.
fn filter_from(directives: Option<&str>, verbose: bool) -> EnvFilter {
    if let Some(filter) = directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
    {
        return filter;
    }
    EnvFilter::new(if verbose { "debug" } else { "warn" })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // The config file may also turn on verbose logging, so keep a handle to
    // raise the level once it is loaded.
    let (filter, filter_handle) = reload::Layer::new(log_filter(cli.verbose));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();

    let loaded = load_config(&default_search_dirs(), cli.config.as_deref())?;
    if loaded.config.verbose && !cli.verbose {
        let _ = filter_handle.reload(log_filter(true));
    }
    if let Some(source) = &loaded.source {
        tracing::debug!("Using config file: {}", source.display());
    }
    let config = loaded.config;

    match cli.command {
        Commands::Analyze(args) => analyze::run(args, &config),
        Commands::Gitingest(args) => gitingest::run(args, &config),
        Commands::Repomix(args) => repomix::run(*args, &config),
        Commands::Setup(args) => setup::run(args, &config),
        Commands::Completions(args) => completions::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_from, Cli};
    use clap::CommandFactory;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rust_log_level_is_not_overridden_by_default() {
        assert_eq!(filter_from(Some("debug"), false).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_from(Some("error"), true).max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn verbose_selects_level_without_rust_log() {
        assert_eq!(filter_from(None, false).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(filter_from(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_from(Some("  "), true).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
