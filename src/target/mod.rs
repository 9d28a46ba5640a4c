//! Classification of the repository an analysis runs against.
//!
//! A target is either a local directory or a remote repository given as a
//! URL or as GitHub `user/repo` shorthand.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

use crate::error::AnalyzerError;

/// Repository selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Absolute path to an existing local directory or file.
    Local(PathBuf),
    Remote(RemoteRepo),
}

/// A remote repository exactly as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    spec: String,
}

impl RemoteRepo {
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }

    /// The original argument, suitable for `repomix --remote`.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// A fetchable URL; GitHub shorthand expands to `https://github.com/...`.
    pub fn url(&self) -> String {
        if has_url_scheme(&self.spec) {
            self.spec.clone()
        } else {
            format!("https://github.com/{}", self.spec.trim_matches('/'))
        }
    }

    /// Repository name: the last URL segment without a `.git` suffix.
    pub fn name(&self) -> String {
        let trimmed = self.spec.trim_end_matches('/');
        let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() {
            "remote".to_string()
        } else {
            name.to_string()
        }
    }
}

impl Target {
    /// Classify `raw` and, for local paths, check existence and absolutize.
    pub fn resolve(raw: &str) -> Result<Self> {
        if is_remote_repository(raw) {
            return Ok(Target::Remote(RemoteRepo::new(raw)));
        }
        Ok(Target::Local(resolve_local(Path::new(raw))?))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Target::Remote(_))
    }

    /// Argument handed to gitingest: a path or a full URL.
    pub fn ingest_source(&self) -> String {
        match self {
            Target::Local(path) => path.display().to_string(),
            Target::Remote(remote) => remote.url(),
        }
    }

    /// Base name used for gitingest output files.
    pub fn ingest_base_name(&self) -> String {
        match self {
            Target::Local(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("root")
                .to_string(),
            Target::Remote(remote) => remote.name(),
        }
    }

    /// Base name used for the repomix output file.
    ///
    /// Local targets are already absolute, so `.` names the working
    /// directory; only a filesystem root falls back to `current`.
    pub fn repomix_base_name(&self) -> String {
        match self {
            Target::Local(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("current")
                .to_string(),
            Target::Remote(remote) => remote.spec().replace(['/', ':'], "_"),
        }
    }

    /// Human-readable description for status output.
    pub fn describe(&self) -> String {
        match self {
            Target::Local(path) => format!("Local path - {}", path.display()),
            Target::Remote(remote) => format!("Remote repository - {}", remote.spec()),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Local(path) => write!(f, "{}", path.display()),
            Target::Remote(remote) => write!(f, "{}", remote.spec()),
        }
    }
}

/// Decide whether `path` names a remote repository.
///
/// Full `http(s)://` URLs are remote. Paths starting with `./`, `../` or `/`
/// are local. Anything else with exactly one `/` and no `.` is treated as
/// GitHub `user/repo` shorthand.
pub fn is_remote_repository(path: &str) -> bool {
    if path.starts_with("https://") || path.starts_with("http://") {
        return true;
    }
    if path.starts_with("./") || path.starts_with('/') || path.starts_with("../") {
        return false;
    }
    path.matches('/').count() == 1 && !path.contains('.')
}

fn has_url_scheme(spec: &str) -> bool {
    spec.contains("://") || spec.starts_with("git@")
}

fn resolve_local(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(AnalyzerError::TargetMissing(path.to_path_buf()).into());
    }
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to get absolute path: {}", path.display()))?;
    Ok(normalize_lexically(&absolute))
}

/// Drop `.` and fold `..` into its parent without touching the filesystem,
/// so `file_name()` yields the directory the user meant.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
