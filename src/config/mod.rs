//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::{default_search_dirs, load_config, LoadedConfig};
pub use merge::{
    merge_analyze, merge_gitingest, merge_repomix, merge_setup, AnalyzeOverrides,
    GitingestOverrides, RepomixOverrides, SetupOverrides,
};
