//! Invocation of the external analysis tools.

pub mod gitingest;
pub mod process;
pub mod repomix;

pub use gitingest::{run_gitingest, GitingestRun};
pub use repomix::{run_repomix, RepomixOptions, RepomixRun};
