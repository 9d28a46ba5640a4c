//! Thin helpers around `std::process::Command`.

use std::ffi::OsStr;
use std::process::{Command, ExitStatus, Stdio};

use crate::error::AnalyzerError;

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout followed by stderr, like a shell's `2>&1`.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&self.stderr);
        }
        out
    }

    /// Turn a non-zero exit into [`AnalyzerError::ToolFailed`].
    pub fn into_checked(self, tool: &str) -> Result<Self, AnalyzerError> {
        if self.success() {
            Ok(self)
        } else {
            Err(AnalyzerError::ToolFailed {
                tool: tool.to_string(),
                status: self.status,
                stderr: self.stderr,
            })
        }
    }
}

/// Run `program args...` to completion, capturing stdout and stderr.
pub fn capture<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<CommandOutput, AnalyzerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null());
    tracing::debug!("Executing: {}", render_command(&cmd));

    let output = cmd.output().map_err(|source| AnalyzerError::Spawn {
        program: program.to_string_lossy().into_owned(),
        source,
    })?;

    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run a command with inherited stdio so the user sees live progress.
pub fn stream(mut cmd: Command) -> Result<ExitStatus, AnalyzerError> {
    tracing::debug!("Executing: {}", render_command(&cmd));
    let program = cmd.get_program().to_string_lossy().into_owned();
    cmd.stdin(Stdio::inherit()).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    cmd.status().map_err(|source| AnalyzerError::Spawn { program, source })
}

/// Trimmed stdout of `program --version`, or `None` if it fails.
pub fn probe_version(program: impl AsRef<OsStr>) -> Option<String> {
    let output = capture(program, ["--version"]).ok()?;
    if !output.success() {
        return None;
    }
    // Python 2 prints its version on stderr.
    let text = if output.stdout.trim().is_empty() { &output.stderr } else { &output.stdout };
    Some(text.trim().to_string())
}

/// Locate `name` on `PATH`.
pub fn find_on_path(name: &str) -> Option<std::path::PathBuf> {
    which::which(name).ok()
}

/// Shell-like rendering of a command line for logs.
pub fn render_command(cmd: &Command) -> String {
    let mut parts = vec![quote(cmd.get_program())];
    parts.extend(cmd.get_args().map(quote));
    let line = parts.join(" ");
    match cmd.get_current_dir() {
        Some(dir) => format!("{line} (in {})", dir.display()),
        None => line,
    }
}

fn quote(part: &OsStr) -> String {
    let s = part.to_string_lossy();
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("{s:?}")
    } else {
        s.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_command_quotes_arguments_with_spaces() {
        let mut cmd = Command::new("npx");
        cmd.args(["repomix", "--header-text", "Hello world"]);
        assert_eq!(render_command(&cmd), "npx repomix --header-text \"Hello world\"");
    }

    #[test]
    fn render_command_mentions_working_directory() {
        let mut cmd = Command::new("npx");
        cmd.arg("repomix").current_dir("/tmp/project");
        assert_eq!(render_command(&cmd), "npx repomix (in /tmp/project)");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = capture("repo-analyzer-definitely-missing-binary", ["--version"]).unwrap_err();
        assert!(matches!(err, AnalyzerError::Spawn { .. }));
        assert!(probe_version("repo-analyzer-definitely-missing-binary").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn capture_collects_both_streams() {
        let out = capture("sh", ["-c", "echo out; echo err >&2; exit 3"]).expect("sh runs");
        assert!(!out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert_eq!(out.combined(), "out\nerr\n");

        let err = out.into_checked("sh").unwrap_err();
        assert!(err.to_string().starts_with("sh exited with"));
        assert!(err.to_string().ends_with(": err"));
    }
}
