//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A command isolated from any config in the real cwd or home directory.
fn analyzer(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-analyzer"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("REPO_ANALYZER_PYTHON__VENV_PATH")
        .env_remove("REPO_ANALYZER_VERBOSE");
    cmd
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repo-analyzer"));
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitingest and repomix"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("gitingest"))
        .stdout(predicate::str::contains("repomix"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_analyze_requires_an_enabled_tool() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["analyze", "--disable-gitingest", "--disable-repomix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one analysis tool must be enabled"));

    assert!(!home.path().join("analysis-results").exists());
}

#[test]
fn test_analyze_tools_disabled_from_config_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("repo-analyzer.config.yaml"),
        "analyze:\n  enable_gitingest: false\n  enable_repomix: false\n",
    )
    .unwrap();

    analyzer(&home)
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one analysis tool must be enabled"));
}

#[test]
fn test_enable_and_disable_flags_conflict() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["analyze", "--enable-repomix", "--disable-repomix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_gitingest_rejects_missing_path() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["gitingest", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target path does not exist"));
}

#[test]
fn test_repomix_rejects_missing_path() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["repomix", "--path", "nowhere/at/all"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target path does not exist"));
}

#[test]
fn test_gitingest_reports_missing_venv() {
    let home = TempDir::new().unwrap();
    let project = home.path().join("project");
    fs::create_dir(&project).unwrap();

    analyzer(&home)
        .env("REPO_ANALYZER_PYTHON__VENV_PATH", home.path().join("no-venv"))
        .args(["gitingest", "--output"])
        .arg(home.path().join("out"))
        .arg(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Python virtual environment not found"));
}

#[test]
fn test_analyze_runs_both_tools_when_one_fails() {
    let home = TempDir::new().unwrap();
    let project = home.path().join("project");
    fs::create_dir(&project).unwrap();

    analyzer(&home)
        .env("PATH", "/nonexistent")
        .env("REPO_ANALYZER_PYTHON__VENV_PATH", home.path().join("no-venv"))
        .args(["analyze", "--output"])
        .arg(home.path().join("results"))
        .arg(&project)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Gitingest analysis failed"))
        .stdout(predicate::str::contains("Repomix analysis failed"))
        .stdout(predicate::str::contains("Python virtual environment not found"))
        .stdout(predicate::str::contains("Node.js ecosystem not found"))
        .stderr(predicate::str::contains("analysis completed with errors"));

    assert!(home.path().join("results").is_dir());
}

#[test]
fn test_explicit_config_errors_are_fatal() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.toml");
    fs::write(&config, "analyze = [not valid").unwrap();

    analyzer(&home)
        .arg("--config")
        .arg(&config)
        .args(["setup", "--skip-python", "--skip-node", "--quiet"])
        .assert()
        .failure();
}

#[test]
fn test_setup_with_everything_skipped_succeeds() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["setup", "--skip-python", "--skip-node", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_setup_prints_system_information() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["setup", "--skip-python", "--skip-node"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    analyzer(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repo-analyzer"));
}
