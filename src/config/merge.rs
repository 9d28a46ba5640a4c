//! CLI argument merging with config

use crate::domain::{AnalyzeConfig, GitingestConfig, RepomixConfig, SetupConfig};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct AnalyzeOverrides {
    pub path: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub enable_gitingest: Option<bool>,
    pub enable_repomix: Option<bool>,
    pub header_text: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct GitingestOverrides {
    pub path: Option<String>,
    pub output: Option<PathBuf>,
    pub json_only: Option<bool>,
}

#[derive(Debug, Default, Clone)]
pub struct RepomixOverrides {
    pub path: Option<String>,
    pub output: Option<PathBuf>,
    pub remote: Option<String>,
    pub include_patterns: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub include_file_summary: Option<bool>,
    pub include_directory_structure: Option<bool>,
    pub show_line_numbers: Option<bool>,
    pub output_parsable_format: Option<bool>,
    pub remove_comments: Option<bool>,
    pub remove_empty_lines: Option<bool>,
    pub top_files_length: Option<usize>,
    pub header_text: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct SetupOverrides {
    pub auto_install: Option<bool>,
    pub quiet: Option<bool>,
    pub skip_python: Option<bool>,
    pub skip_node: Option<bool>,
    pub force_venv: Option<bool>,
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

pub fn merge_analyze(mut base: AnalyzeConfig, cli: AnalyzeOverrides) -> AnalyzeConfig {
    set(&mut base.path, cli.path);
    set(&mut base.output_dir, cli.output_dir);
    set(&mut base.enable_gitingest, cli.enable_gitingest);
    set(&mut base.enable_repomix, cli.enable_repomix);
    if let Some(header_text) = cli.header_text {
        base.header_text = Some(header_text);
    }
    base
}

pub fn merge_gitingest(mut base: GitingestConfig, cli: GitingestOverrides) -> GitingestConfig {
    set(&mut base.path, cli.path);
    set(&mut base.output, cli.output);
    set(&mut base.json_only, cli.json_only);
    base
}

pub fn merge_repomix(mut base: RepomixConfig, cli: RepomixOverrides) -> RepomixConfig {
    set(&mut base.path, cli.path);
    set(&mut base.output, cli.output);
    if let Some(remote) = cli.remote {
        base.remote = Some(remote);
    }
    set(&mut base.include_patterns, cli.include_patterns);
    set(&mut base.ignore_patterns, cli.ignore_patterns);
    set(&mut base.include_file_summary, cli.include_file_summary);
    set(&mut base.include_directory_structure, cli.include_directory_structure);
    set(&mut base.show_line_numbers, cli.show_line_numbers);
    set(&mut base.output_parsable_format, cli.output_parsable_format);
    set(&mut base.remove_comments, cli.remove_comments);
    set(&mut base.remove_empty_lines, cli.remove_empty_lines);
    set(&mut base.top_files_length, cli.top_files_length);
    if let Some(header_text) = cli.header_text {
        base.header_text = Some(header_text);
    }
    base
}

pub fn merge_setup(mut base: SetupConfig, cli: SetupOverrides) -> SetupConfig {
    set(&mut base.auto_install, cli.auto_install);
    set(&mut base.quiet, cli.quiet);
    set(&mut base.skip_python, cli.skip_python);
    set(&mut base.skip_node, cli.skip_node);
    set(&mut base.force_venv, cli.force_venv);
    base
}
