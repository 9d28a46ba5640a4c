//! gitingest invocation through the dedicated Python virtual environment.
//!
//! The Python side only calls `gitingest.ingest` and dumps the three text
//! blocks to a temporary JSON file. Everything else (naming, statistics,
//! cleaning, writing) happens here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::PythonEnv;
use crate::error::AnalyzerError;
use crate::output::{timestamped_path, write_clean_file, write_clean_json_file};
use crate::target::Target;
use crate::tools::process::capture;
use crate::utils::count_lines;

/// Printed by the bridge script once the JSON file is complete.
pub const COMPLETION_SENTINEL: &str = "GITINGEST_COMPLETED";

/// Bridge script run as `python -c SCRIPT <target> <is_remote> <results_file>`.
pub const INGEST_SCRIPT: &str = r#"
import json
import os
import sys

from gitingest import ingest


def main():
    target, is_remote, results_file = sys.argv[1], sys.argv[2] == "1", sys.argv[3]
    if not is_remote and not os.path.exists(target):
        print(f"Error: The target path '{target}' does not exist.", file=sys.stderr)
        return 1

    print(f"Starting gitingest parsing of: {target}")
    try:
        summary, tree, content = ingest(target)
    except Exception as exc:
        print(f"Error during gitingest analysis: {exc}", file=sys.stderr)
        return 1

    with open(results_file, "w", encoding="utf-8") as handle:
        json.dump({"summary": summary, "tree": tree, "content": content}, handle, ensure_ascii=False)

    print("GITINGEST_COMPLETED")
    return 0


sys.exit(main())
"#;

/// Raw blocks returned by `gitingest.ingest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestPayload {
    pub summary: String,
    pub tree: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    pub summary_lines: usize,
    pub tree_lines: usize,
    pub content_lines: usize,
    /// Characters, not bytes.
    pub content_size: usize,
}

/// The record saved as `<base>_results_<timestamp>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResults {
    pub timestamp: String,
    pub target_path: String,
    pub base_name: String,
    pub summary: String,
    pub tree: String,
    pub content: String,
    pub json_only: bool,
    pub stats: IngestStats,
}

impl IngestResults {
    pub fn new(target: &Target, payload: IngestPayload, json_only: bool, timestamp: String) -> Self {
        let stats = IngestStats {
            summary_lines: count_lines(&payload.summary),
            tree_lines: count_lines(&payload.tree),
            content_lines: count_lines(&payload.content),
            content_size: payload.content.chars().count(),
        };
        Self {
            timestamp,
            target_path: target.ingest_source(),
            base_name: target.ingest_base_name(),
            summary: payload.summary,
            tree: payload.tree,
            content: payload.content,
            json_only,
            stats,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Summary,
    Tree,
    Content,
    Json,
}

impl OutputKind {
    pub fn label(self) -> &'static str {
        match self {
            OutputKind::Summary => "Summary",
            OutputKind::Tree => "Tree structure",
            OutputKind::Content => "Content",
            OutputKind::Json => "JSON results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub kind: OutputKind,
    pub path: PathBuf,
}

/// A completed gitingest run.
#[derive(Debug, Clone)]
pub struct GitingestRun {
    pub results: IngestResults,
    pub files: Vec<WrittenFile>,
}

/// Run the bridge script and decode its JSON payload.
pub fn ingest(venv: &PythonEnv, target: &Target) -> Result<IngestPayload> {
    let results_file = tempfile::Builder::new()
        .prefix("gitingest_results")
        .suffix(".json")
        .tempfile()
        .context("failed to create temporary results file")?;
    let results_path = results_file.path().to_string_lossy().into_owned();
    let source = target.ingest_source();
    let is_remote = if target.is_remote() { "1" } else { "0" };

    let output = capture(
        venv.python(),
        ["-c", INGEST_SCRIPT, source.as_str(), is_remote, results_path.as_str()],
    )?
    .into_checked("gitingest")?;
    if !output.stdout.contains(COMPLETION_SENTINEL) {
        tracing::warn!("gitingest output:\n{}", output.combined().trim_end());
        return Err(AnalyzerError::IngestIncomplete.into());
    }

    let raw = fs::read_to_string(results_file.path())
        .context("failed to read JSON results file")?;
    serde_json::from_str(&raw).context("failed to parse JSON results")
}

/// Write the text files (unless `json_only`) and the JSON record.
pub fn write_outputs(results: &IngestResults, output_dir: &Path) -> Result<Vec<WrittenFile>> {
    let stem = |kind: &str| format!("{}_{kind}", results.base_name);
    let mut written = Vec::new();

    if !results.json_only {
        let blocks = [
            (OutputKind::Summary, "summary", &results.summary),
            (OutputKind::Tree, "tree", &results.tree),
            (OutputKind::Content, "content", &results.content),
        ];
        for (kind, name, text) in blocks {
            let path = timestamped_path(output_dir, &stem(name), &results.timestamp, "txt");
            write_clean_file(&path, text)
                .with_context(|| format!("failed to write {} file", name))?;
            written.push(WrittenFile { kind, path });
        }
    }

    let json_path = timestamped_path(output_dir, &stem("results"), &results.timestamp, "json");
    let json = serde_json::to_string_pretty(results)?;
    write_clean_json_file(&json_path, &json).context("failed to write JSON file")?;
    written.push(WrittenFile { kind: OutputKind::Json, path: json_path });

    Ok(written)
}

/// Full gitingest pipeline: ingest, assemble the record, write outputs.
pub fn run_gitingest(
    venv: &PythonEnv,
    target: &Target,
    output_dir: &Path,
    json_only: bool,
    timestamp: String,
) -> Result<GitingestRun> {
    let payload = ingest(venv, target)?;
    let results = IngestResults::new(target, payload, json_only, timestamp);
    let files = write_outputs(&results, output_dir)?;
    Ok(GitingestRun { results, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::RemoteRepo;
    use tempfile::TempDir;

    fn payload() -> IngestPayload {
        IngestPayload {
            summary: "Repository: demo\nFiles analyzed: 2".to_string(),
            tree: "└── demo/\n    ├── a.rs\n    └── b.rs\n".to_string(),
            content: "fn a() {}\u{2028}fn b() {}\r\n".to_string(),
        }
    }

    #[test]
    fn results_compute_stats_from_payload() {
        let target = Target::Local(PathBuf::from("/work/demo"));
        let results = IngestResults::new(&target, payload(), false, "20240102_030405".into());
        assert_eq!(results.base_name, "demo");
        assert_eq!(results.target_path, "/work/demo");
        assert_eq!(
            results.stats,
            IngestStats { summary_lines: 2, tree_lines: 4, content_lines: 2, content_size: 21 }
        );
    }

    #[test]
    fn remote_results_use_repository_name() {
        let target = Target::Remote(RemoteRepo::new("octo/widget"));
        let results = IngestResults::new(&target, payload(), true, "20240102_030405".into());
        assert_eq!(results.base_name, "widget");
        assert_eq!(results.target_path, "https://github.com/octo/widget");
    }

    #[test]
    fn write_outputs_creates_cleaned_text_and_json() {
        let tmp = TempDir::new().expect("tmp");
        let target = Target::Local(PathBuf::from("/work/demo"));
        let results = IngestResults::new(&target, payload(), false, "20240102_030405".into());

        let files = write_outputs(&results, tmp.path()).expect("write");
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().expect("name").to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "demo_summary_20240102_030405.txt",
                "demo_tree_20240102_030405.txt",
                "demo_content_20240102_030405.txt",
                "demo_results_20240102_030405.json",
            ]
        );

        let content = fs::read_to_string(&files[2].path).expect("content");
        assert_eq!(content, "fn a() {}\nfn b() {}\n");

        let json = fs::read_to_string(&files[3].path).expect("json");
        assert!(!json.contains('\u{2028}'));
        let decoded: IngestResults = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded.content, "fn a() {}\nfn b() {}\r\n");
        assert_eq!(decoded.stats.content_lines, 2);
    }

    #[test]
    fn json_only_skips_text_files() {
        let tmp = TempDir::new().expect("tmp");
        let target = Target::Local(PathBuf::from("/work/demo"));
        let results = IngestResults::new(&target, payload(), true, "20240102_030405".into());

        let files = write_outputs(&results, tmp.path()).expect("write");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].kind, OutputKind::Json);
        assert_eq!(fs::read_dir(tmp.path()).expect("read dir").count(), 1);
    }

    #[test]
    fn bridge_script_reads_arguments_and_prints_sentinel() {
        assert!(INGEST_SCRIPT.contains("sys.argv[3]"));
        assert!(INGEST_SCRIPT.contains(COMPLETION_SENTINEL));
        assert!(INGEST_SCRIPT.contains("ensure_ascii=False"));
    }

    #[cfg(unix)]
    #[test]
    fn run_gitingest_uses_venv_interpreter() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tmp");
        let venv = PythonEnv::new(tmp.path().join(".venv"));
        let python = venv.python();
        fs::create_dir_all(python.parent().expect("bin")).expect("mkdir");
        // Stand-in interpreter: `$1=-c $2=script $3=target $4=is_remote $5=results_file`.
        fs::write(
            &python,
            "#!/bin/sh\nprintf '{\"summary\":\"S\",\"tree\":\"T\",\"content\":\"C\"}' > \"$5\"\necho GITINGEST_COMPLETED\n",
        )
        .expect("write fake python");
        fs::set_permissions(&python, fs::Permissions::from_mode(0o755)).expect("chmod");

        let repo = tmp.path().join("demo");
        fs::create_dir(&repo).expect("mkdir repo");
        let out = tmp.path().join("out");
        fs::create_dir(&out).expect("mkdir out");

        let run = run_gitingest(&venv, &Target::Local(repo), &out, false, "20240102_030405".into())
            .expect("run");
        assert_eq!(run.results.summary, "S");
        assert_eq!(run.files.len(), 4);
        assert_eq!(
            fs::read_to_string(out.join("demo_tree_20240102_030405.txt")).expect("tree"),
            "T"
        );
    }
}
