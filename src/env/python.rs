//! Python interpreter and virtual environment discovery.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::error::AnalyzerError;
use crate::tools::process::{capture, find_on_path, probe_version};

/// Pre-built virtual environment shipped in the container image.
pub const CONTAINER_VENV: &str = "/app/.venv";

/// Interpreter names tried, in order, when looking for a system Python.
pub const SYSTEM_PYTHON_CANDIDATES: [&str; 2] = ["python3", "python"];

/// One-liner proving gitingest imports inside the venv.
pub const GITINGEST_IMPORT_PROBE: &str = "import gitingest; print('gitingest available')";

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Python\s+(\d+)\.(\d+)(?:\.(\d+))?").expect("valid python version regex")
});

/// Parsed `python --version` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl PythonVersion {
    pub fn parse(text: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(text)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
            patch: caps.get(3).and_then(|m| m.as_str().parse().ok()),
        })
    }

    pub fn is_python3(&self) -> bool {
        self.major >= 3
    }
}

/// A system Python found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemPython {
    /// The command name that resolved (`python3` or `python`).
    pub command: &'static str,
    pub path: PathBuf,
}

/// First of [`SYSTEM_PYTHON_CANDIDATES`] present on `PATH`.
pub fn find_system_python() -> Option<SystemPython> {
    SYSTEM_PYTHON_CANDIDATES
        .iter()
        .find_map(|&command| find_on_path(command).map(|path| SystemPython { command, path }))
}

/// The dedicated virtual environment that hosts gitingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonEnv {
    root: PathBuf,
}

impl PythonEnv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Configured path, then the container venv, then `./.venv`.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        if let Some(path) = configured {
            return Ok(Self::new(path));
        }
        let container = Path::new(CONTAINER_VENV);
        if container.exists() {
            return Ok(Self::new(container));
        }
        Ok(Self::new(std::env::current_dir()?.join(".venv")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }

    pub fn pip(&self) -> PathBuf {
        self.executable("pip")
    }

    fn executable(&self, name: &str) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts").join(format!("{name}.exe"))
        } else {
            self.root.join("bin").join(name)
        }
    }

    pub fn exists(&self) -> bool {
        self.python().exists()
    }

    /// Venv interpreter version, or `None` if it does not run.
    pub fn version(&self) -> Option<String> {
        probe_version(self.python())
    }

    /// Output of the gitingest import probe when the import succeeds.
    pub fn gitingest_status(&self) -> Option<String> {
        let output = capture(self.python(), ["-c", GITINGEST_IMPORT_PROBE]).ok()?;
        output.success().then(|| output.stdout.trim().to_string())
    }

    /// Fail unless the venv interpreter exists and runs.
    pub fn ensure_python(&self) -> Result<(), AnalyzerError> {
        if !self.exists() {
            return Err(AnalyzerError::VenvMissing);
        }
        if self.version().is_none() {
            return Err(AnalyzerError::VenvBroken);
        }
        tracing::debug!("Found Python in virtual environment: {}", self.python().display());
        Ok(())
    }

    /// Fail unless `import gitingest` works inside the venv.
    pub fn ensure_gitingest(&self) -> Result<(), AnalyzerError> {
        if !self.exists() {
            return Err(AnalyzerError::VenvMissing);
        }
        if self.gitingest_status().is_none() {
            return Err(AnalyzerError::GitingestMissing);
        }
        tracing::debug!("Gitingest is available in virtual environment: {}", self.python().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_python_versions() {
        assert_eq!(
            PythonVersion::parse("Python 3.12.1"),
            Some(PythonVersion { major: 3, minor: 12, patch: Some(1) })
        );
        assert_eq!(
            PythonVersion::parse("Python 2.7"),
            Some(PythonVersion { major: 2, minor: 7, patch: None })
        );
        assert!(PythonVersion::parse("command not found").is_none());
        assert!(PythonVersion::parse("Python 3.11.0rc1").expect("rc").is_python3());
    }

    #[test]
    fn configured_venv_wins() {
        let env = PythonEnv::locate(Some(Path::new("/opt/tools/venv"))).expect("locate");
        assert_eq!(env.root(), Path::new("/opt/tools/venv"));
    }

    #[cfg(unix)]
    #[test]
    fn unix_layout_uses_bin() {
        let env = PythonEnv::new("/v");
        assert_eq!(env.python(), Path::new("/v/bin/python"));
        assert_eq!(env.pip(), Path::new("/v/bin/pip"));
    }

    #[test]
    fn missing_venv_is_reported() {
        let tmp = TempDir::new().expect("tmp");
        let env = PythonEnv::new(tmp.path().join(".venv"));
        assert!(!env.exists());
        assert!(matches!(env.ensure_python(), Err(AnalyzerError::VenvMissing)));
        assert!(matches!(env.ensure_gitingest(), Err(AnalyzerError::VenvMissing)));
    }

    #[cfg(unix)]
    #[test]
    fn broken_interpreter_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tmp");
        let env = PythonEnv::new(tmp.path().join(".venv"));
        let python = env.python();
        std::fs::create_dir_all(python.parent().expect("bin dir")).expect("mkdir");
        std::fs::write(&python, "#!/bin/sh\nexit 1\n").expect("write");
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        assert!(env.exists());
        assert!(matches!(env.ensure_python(), Err(AnalyzerError::VenvBroken)));
        assert!(matches!(env.ensure_gitingest(), Err(AnalyzerError::GitingestMissing)));
    }
}
