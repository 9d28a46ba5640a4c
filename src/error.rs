//! Typed failures raised while preparing or running the external tools.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("target path does not exist: {0}")]
    TargetMissing(PathBuf),

    #[error("at least one analysis tool must be enabled")]
    NoToolsEnabled,

    #[error("Python virtual environment not found. Please run: repo-analyzer setup")]
    VenvMissing,

    #[error("virtual environment Python is not working. Please run: repo-analyzer setup")]
    VenvBroken,

    #[error("gitingest is not available in virtual environment. Please run: repo-analyzer setup")]
    GitingestMissing,

    #[error("Node.js ecosystem not found. Please install Node.js and npm")]
    NodeMissing,

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}{}", stderr_suffix(.stderr))]
    ToolFailed { tool: String, status: ExitStatus, stderr: String },

    #[error("gitingest analysis did not complete successfully")]
    IngestIncomplete,
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::AnalyzerError;
    use std::path::PathBuf;

    #[test]
    fn messages_point_users_at_setup() {
        assert_eq!(
            AnalyzerError::VenvMissing.to_string(),
            "Python virtual environment not found. Please run: repo-analyzer setup"
        );
        assert_eq!(
            AnalyzerError::TargetMissing(PathBuf::from("nope")).to_string(),
            "target path does not exist: nope"
        );
    }
}
