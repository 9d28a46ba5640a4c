//! Automatic repair of the Python side of the environment.

use anyhow::{Context, Result};

use super::python::{find_system_python, PythonEnv};
use crate::tools::process::capture;

/// What an installation step did, for the caller to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Command line that was executed.
    pub command: String,
    /// Combined stdout/stderr of the step.
    pub output: String,
}

/// `python -m venv <root>`, removing any previous directory when `recreate`.
pub fn create_virtual_environment(venv: &PythonEnv, recreate: bool) -> Result<StepOutcome> {
    let system = find_system_python().context("no Python executable found")?;

    if recreate && venv.root().exists() {
        std::fs::remove_dir_all(venv.root()).with_context(|| {
            format!("failed to remove virtual environment {}", venv.root().display())
        })?;
    }

    let root = venv.root().to_string_lossy().into_owned();
    let command = format!("{} -m venv {root}", system.command);
    let output = capture(&system.path, ["-m", "venv", root.as_str()])?;
    let combined = output.combined();
    output
        .into_checked("python -m venv")
        .context("failed to create virtual environment")?;

    Ok(StepOutcome { command, output: combined })
}

/// Upgrade pip inside the venv. Failures are returned to be shown as warnings.
pub fn upgrade_pip(venv: &PythonEnv) -> Result<StepOutcome> {
    let pip = venv.pip();
    let command = format!("{} install --upgrade pip", pip.display());
    let output = capture(&pip, ["install", "--upgrade", "pip"])?;
    let combined = output.combined();
    output.into_checked("pip").context("failed to upgrade pip")?;
    Ok(StepOutcome { command, output: combined })
}

/// `pip install gitingest`, creating the venv first if it is absent.
pub fn install_gitingest(venv: &PythonEnv) -> Result<StepOutcome> {
    if !venv.pip().exists() {
        create_virtual_environment(venv, false)?;
    }

    if let Err(err) = upgrade_pip(venv) {
        tracing::warn!("Failed to upgrade pip: {err:#}");
    }

    let pip = venv.pip();
    let command = format!("{} install gitingest", pip.display());
    let output = capture(&pip, ["install", "gitingest"])?;
    let combined = output.combined();
    output.into_checked("pip").context("failed to install gitingest")?;
    Ok(StepOutcome { command, output: combined })
}
