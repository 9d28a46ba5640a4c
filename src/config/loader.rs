//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `REPO_ANALYZER_ANALYZE__OUTPUT_DIR`.
pub const ENV_PREFIX: &str = "REPO_ANALYZER_";

/// Top-level key under which a config document may nest its settings.
const NESTED_SECTION: &str = "repo-analyzer";

const CANDIDATES: [&str; 3] =
    ["repo-analyzer.config.yaml", "repo-analyzer.config.yml", "repo-analyzer.config.toml"];

/// A loaded configuration and the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Load config from `config_path`, or discover it in `search_dirs`, then
/// overlay `REPO_ANALYZER_*` environment variables.
pub fn load_config(search_dirs: &[PathBuf], config_path: Option<&Path>) -> Result<LoadedConfig> {
    let (file_config, source) = load_file_config(search_dirs, config_path)?;
    let config = apply_env_overrides(file_config)?;
    Ok(LoadedConfig { config, source })
}

/// Current directory first, then the home directory.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(home) = dirs::home_dir() {
        if !dirs.contains(&home) {
            dirs.push(home);
        }
    }
    dirs
}

fn load_file_config(
    search_dirs: &[PathBuf],
    config_path: Option<&Path>,
) -> Result<(Config, Option<PathBuf>)> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dirs),
    };

    let Some(config_file) = discovered else {
        return Ok((Config::default(), None));
    };

    let parsed = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))
        .and_then(|content| parse_config(&content, &config_file));

    match parsed {
        Ok(cfg) => Ok((cfg, Some(config_file))),
        Err(e) if config_path_provided => Err(e),
        Err(e) => {
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to load auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok((Config::default(), None))
        }
    }
}

fn parse_config(content: &str, config_file: &Path) -> Result<Config> {
    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "toml" => parse_toml_config(content, config_file),
        "yaml" | "yml" => parse_yaml_config(content, config_file),
        other => anyhow::bail!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        ),
    }
}

/// Parse TOML config, supporting a nested [repo-analyzer] table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val.try_into().with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `repo-analyzer:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    // An empty document parses as null; treat it as "all defaults".
    if raw.is_null() {
        return Ok(Config::default());
    }

    let config_val = match raw.get(NESTED_SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn apply_env_overrides(base: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(base))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Invalid REPO_ANALYZER_* environment override")
}

fn discover_config(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| CANDIDATES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dirs_of(tmp: &TempDir) -> Vec<PathBuf> {
        vec![tmp.path().to_path_buf()]
    }

    #[test]
    fn test_load_config_defaults_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let (cfg, source) = load_file_config(&dirs_of(&tmp), None).expect("config");
        assert_eq!(cfg, Config::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_discovers_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("repo-analyzer.config.yaml");
        fs::write(
            &path,
            "verbose: true\nanalyze:\n  output_dir: reports\n  enable_repomix: false\nrepomix:\n  top-files-length: 9\n",
        )
        .expect("write");

        let (cfg, source) = load_file_config(&dirs_of(&tmp), None).expect("config");
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert!(cfg.verbose);
        assert_eq!(cfg.analyze.output_dir, PathBuf::from("reports"));
        assert!(!cfg.analyze.enable_repomix);
        assert!(cfg.analyze.enable_gitingest);
        assert_eq!(cfg.repomix.top_files_length, 9);
    }

    #[test]
    fn test_first_search_dir_wins() {
        let local = TempDir::new().expect("local");
        let home = TempDir::new().expect("home");
        fs::write(local.path().join("repo-analyzer.config.toml"), "verbose = true\n").expect("write");
        fs::write(home.path().join("repo-analyzer.config.yaml"), "verbose: false\n").expect("write");

        let dirs = vec![local.path().to_path_buf(), home.path().to_path_buf()];
        let (cfg, source) = load_file_config(&dirs, None).expect("config");
        assert!(cfg.verbose);
        assert!(source.expect("source").ends_with("repo-analyzer.config.toml"));
    }

    #[test]
    fn test_toml_nested_section() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "[repo-analyzer.gitingest]\njson_only = true\noutput = 'ingest'\n")
            .expect("write");

        let (cfg, _) = load_file_config(&[], Some(&path)).expect("config");
        assert!(cfg.gitingest.json_only);
        assert_eq!(cfg.gitingest.output, PathBuf::from("ingest"));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("repo-analyzer.config.yaml");
        fs::write(&path, "").expect("write");
        let (cfg, _) = load_file_config(&[], Some(&path)).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_explicit_config_invalid_type_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "repomix:\n  top_files_length: many\n").expect("write");

        let result = load_file_config(&[], Some(&path));
        assert!(result.is_err(), "explicit config with invalid type should return Err");
    }

    #[test]
    fn test_explicit_config_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.ini");
        fs::write(&path, "verbose=true\n").expect("write");

        let err = load_file_config(&[], Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Unsupported config extension"));
    }

    #[test]
    fn test_explicit_missing_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let result = load_file_config(&[], Some(&tmp.path().join("nope.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_auto_discovered_invalid_config_returns_default() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("repo-analyzer.config.yaml"), "setup: [not, a, map]\n")
            .expect("write");

        let (cfg, source) =
            load_file_config(&dirs_of(&tmp), None).expect("should not error on auto-discovery");
        assert_eq!(cfg, Config::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REPO_ANALYZER_ANALYZE__OUTPUT_DIR", "from-env");
            jail.set_env("REPO_ANALYZER_REPOMIX__REMOVE_COMMENTS", "false");
            jail.set_env("REPO_ANALYZER_PYTHON__VENV_PATH", "/opt/venv");

            let mut base = Config::default();
            base.analyze.output_dir = PathBuf::from("from-file");
            base.analyze.header_text = Some("kept".to_string());

            let cfg = apply_env_overrides(base).expect("overlay");
            assert_eq!(cfg.analyze.output_dir, PathBuf::from("from-env"));
            assert_eq!(cfg.analyze.header_text.as_deref(), Some("kept"));
            assert!(!cfg.repomix.remove_comments);
            assert_eq!(cfg.python.venv_path, Some(PathBuf::from("/opt/venv")));
            Ok(())
        });
    }
}
