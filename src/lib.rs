//! Repo-Analyzer: run gitingest and repomix against a repository
//!
//! This library wraps two external analysis tools, manages the Python and
//! Node.js prerequisites they need, and writes their cleaned output to
//! timestamped files.

pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod output;
pub mod target;
pub mod tools;
pub mod utils;
