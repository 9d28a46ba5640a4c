//! Writers for cleaned tool output.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::clean::{clean_json_text, clean_text_for_file};

/// Create `dir` (and parents) if it does not already exist.
pub fn create_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    tracing::debug!("Created output directory: {}", dir.display());
    Ok(())
}

/// Build `<dir>/<prefix>_<timestamp>.<extension>`.
pub fn timestamped_path(dir: &Path, prefix: &str, timestamp: &str, extension: &str) -> PathBuf {
    dir.join(format!("{prefix}_{timestamp}.{extension}"))
}

/// Write `content` after [`clean_text_for_file`] normalization.
pub fn write_clean_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, clean_text_for_file(content))
        .with_context(|| format!("failed to write file {}", path.display()))?;
    tracing::debug!("File written with cleaned content: {}", path.display());
    Ok(())
}

/// Write JSON text with only the separator characters escaped.
pub fn write_clean_json_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, clean_json_text(content))
        .with_context(|| format!("failed to write JSON file {}", path.display()))?;
    tracing::debug!("JSON file written with cleaned content: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_output_dir_is_idempotent() {
        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join("a").join("b");
        create_output_dir(&dir).expect("create");
        create_output_dir(&dir).expect("create again");
        assert!(dir.is_dir());
    }

    #[test]
    fn create_output_dir_fails_when_a_file_is_in_the_way() {
        let tmp = TempDir::new().expect("tmp");
        let blocker = tmp.path().join("results");
        fs::write(&blocker, "not a dir").expect("write");
        assert!(create_output_dir(&blocker.join("nested")).is_err());
    }

    #[test]
    fn timestamped_path_joins_parts() {
        let path = timestamped_path(Path::new("out"), "repo_tree", "20240101_120000", "txt");
        assert_eq!(path, Path::new("out").join("repo_tree_20240101_120000.txt"));
    }

    #[test]
    fn write_clean_file_normalizes_content() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("summary.txt");
        write_clean_file(&path, "line one\r\nline\u{2028}two\u{0001}").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "line one\nline\ntwo");
    }

    #[test]
    fn write_clean_json_file_keeps_json_valid() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("results.json");
        write_clean_json_file(&path, "{\"tree\":\"a\u{2029}b\"}").expect("write");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(value["tree"], "a\nb");
    }
}
