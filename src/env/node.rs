//! Node.js toolchain discovery for launching repomix.

use std::path::PathBuf;
use std::process::Command;

use crate::error::AnalyzerError;
use crate::tools::process::find_on_path;

/// How the `repomix` package gets executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeLauncher {
    /// `npx repomix ...`
    Npx(PathBuf),
    /// `npm exec --yes -- repomix ...` when npx is absent.
    NpmExec(PathBuf),
}

impl NodeLauncher {
    /// Prefer npx, fall back to `npm exec`.
    ///
    /// A bare `node` binary cannot fetch packages, so it only changes the
    /// wording of the log line before failing.
    pub fn detect() -> Result<Self, AnalyzerError> {
        if let Some(npx) = find_on_path("npx") {
            tracing::debug!("Found npx: {}", npx.display());
            return Ok(NodeLauncher::Npx(npx));
        }
        if let Some(npm) = find_on_path("npm") {
            tracing::debug!("Found npm: {}", npm.display());
            return Ok(NodeLauncher::NpmExec(npm));
        }
        if let Some(node) = find_on_path("node") {
            tracing::debug!("Found node without npm/npx: {}", node.display());
        }
        Err(AnalyzerError::NodeMissing)
    }

    /// A command with the launcher prefix applied; callers append the
    /// package name and its arguments.
    pub fn command(&self) -> Command {
        match self {
            NodeLauncher::Npx(path) => Command::new(path),
            NodeLauncher::NpmExec(path) => {
                let mut cmd = Command::new(path);
                cmd.args(["exec", "--yes", "--"]);
                cmd
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeLauncher::Npx(_) => "npx",
            NodeLauncher::NpmExec(_) => "npm exec",
        }
    }
}
