//! repo-analyzer: analyze repositories with gitingest and repomix
//!
//! Orchestrates the Python `gitingest` summarizer and the Node `repomix`
//! packager, writing normalized results into an output directory.

use anyhow::Result;

fn main() -> Result<()> {
    repo_analyzer::cli::run()
}
