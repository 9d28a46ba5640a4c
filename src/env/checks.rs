//! Environment checks performed by `setup`.
//!
//! Checks never print. They return a [`EnvironmentReport`] whose status
//! lines the CLI renders (or suppresses in quiet mode).

use std::fmt;

use super::python::{find_system_python, PythonEnv, PythonVersion};
use crate::tools::process::{capture, find_on_path, probe_version};

/// A problem that prevents one of the tools from running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue {
    PythonMissing,
    PythonVersionCheckFailed,
    VenvMissing,
    VenvPythonBroken,
    GitingestMissing,
    NodeMissing,
    NpmMissing,
}

impl Issue {
    /// Whether `setup --auto-install` can fix this on its own.
    pub fn auto_installable(self) -> bool {
        matches!(self, Issue::VenvMissing | Issue::VenvPythonBroken | Issue::GitingestMissing)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Issue::PythonMissing => "Python is not installed or not in PATH",
            Issue::PythonVersionCheckFailed => "Python version check failed",
            Issue::VenvMissing => "Python virtual environment not found",
            Issue::VenvPythonBroken => "Virtual environment Python check failed",
            Issue::GitingestMissing => "gitingest not installed in virtual environment",
            Issue::NodeMissing => "Node.js is not installed or not in PATH",
            Issue::NpmMissing => "npm is not installed or not in PATH",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
    Info,
}

impl CheckStatus {
    pub fn icon(self) -> &'static str {
        match self {
            CheckStatus::Ok => "✅",
            CheckStatus::Warn => "⚠️ ",
            CheckStatus::Fail => "❌",
            CheckStatus::Info => "🔄",
        }
    }
}

/// One rendered probe result, e.g. `✅ Python: Python 3.12.1 (python3)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLine {
    pub status: CheckStatus,
    pub label: String,
    pub detail: String,
}

impl fmt::Display for CheckLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   {} {}: {}", self.status.icon(), self.label, self.detail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub lines: Vec<CheckLine>,
    pub issues: Vec<Issue>,
    pub warnings: Vec<String>,
}

impl EnvironmentReport {
    fn line(&mut self, status: CheckStatus, label: &str, detail: impl Into<String>) {
        self.lines.push(CheckLine { status, label: label.to_string(), detail: detail.into() });
    }

    fn fail(&mut self, issue: Issue, label: &str, detail: &str) {
        self.issues.push(issue);
        self.line(CheckStatus::Fail, label, detail);
    }

    fn warn(&mut self, warning: impl Into<String>, label: &str, detail: &str) {
        self.warnings.push(warning.into());
        self.line(CheckStatus::Warn, label, detail);
    }

    pub fn merge(&mut self, other: EnvironmentReport) {
        self.lines.extend(other.lines);
        self.issues.extend(other.issues);
        self.warnings.extend(other.warnings);
    }

    pub fn is_ready(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Warning text for a system Python that is not 3.x.
pub fn python_version_warning(version: &str) -> Option<String> {
    match PythonVersion::parse(version) {
        Some(v) if v.is_python3() => None,
        _ => Some(format!("Python 2.x detected ({version}). Python 3.x is recommended")),
    }
}

/// System Python, the dedicated venv, and gitingest inside it.
///
/// With `force_venv` the venv directory is deleted first, so the check
/// reports it missing and the installer rebuilds it.
pub fn check_python_environment(venv: &PythonEnv, force_venv: bool) -> EnvironmentReport {
    let mut report = EnvironmentReport::default();

    let Some(system) = find_system_python() else {
        report.fail(Issue::PythonMissing, "Python", "Not found");
        return report;
    };

    match probe_version(&system.path) {
        Some(version) => {
            report.line(CheckStatus::Ok, "Python", format!("{version} ({})", system.command));
            if let Some(warning) = python_version_warning(&version) {
                report.warnings.push(warning);
            }
        }
        None => report.fail(Issue::PythonVersionCheckFailed, "Python", "Version check failed"),
    }

    if force_venv && venv.root().exists() {
        report.line(CheckStatus::Info, "Virtual Environment", "Force recreating...");
        if let Err(err) = std::fs::remove_dir_all(venv.root()) {
            tracing::warn!("failed to remove {}: {err}", venv.root().display());
        }
    }

    if !venv.exists() {
        report.fail(
            Issue::VenvMissing,
            "Virtual Environment",
            &format!("Not found ({})", venv.root().display()),
        );
        return report;
    }

    let Some(version) = venv.version() else {
        report.fail(Issue::VenvPythonBroken, "Virtual Environment", "Python check failed");
        return report;
    };
    report.line(CheckStatus::Ok, "Virtual Environment", version);

    match venv.gitingest_status() {
        Some(status) => report.line(CheckStatus::Ok, "gitingest", status),
        None => report.fail(
            Issue::GitingestMissing,
            "gitingest",
            "Not installed in virtual environment",
        ),
    }

    report
}

/// node, npm, npx and repomix reachability.
pub fn check_node_environment() -> EnvironmentReport {
    let mut report = EnvironmentReport::default();

    for (name, issue) in [("node", Issue::NodeMissing), ("npm", Issue::NpmMissing)] {
        let label = if name == "node" { "Node.js" } else { "npm" };
        match find_on_path(name) {
            None => report.fail(issue, label, "Not found"),
            Some(path) => match probe_version(&path) {
                Some(version) => report.line(CheckStatus::Ok, label, version),
                None => report.warn(
                    format!("{label} version check failed"),
                    label,
                    "Version check failed",
                ),
            },
        }
    }

    let Some(npx) = find_on_path("npx") else {
        report.warn("npx is not installed or not in PATH", "npx", "Not found");
        return report;
    };
    match probe_version(&npx) {
        Some(version) => report.line(CheckStatus::Ok, "npx", version),
        None => report.warn("npx version check failed", "npx", "Version check failed"),
    }

    // repomix is fetched on demand by npx, so a failed probe is not an issue.
    match capture(&npx, ["--no-install", "repomix", "--version"]) {
        Ok(out) if out.success() => report.line(
            CheckStatus::Ok,
            "repomix",
            format!("{} (already installed)", out.stdout.trim()),
        ),
        _ => report.line(
            CheckStatus::Ok,
            "repomix",
            "Available via npx (will be installed on first use)",
        ),
    }

    report
}
