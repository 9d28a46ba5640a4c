//! Shared CLI utilities.

use std::fmt::Display;

use crate::domain::split_patterns;

/// Parse a comma-separated string into a `Vec<String>`, trimming whitespace and
/// discarding empty segments.  Returns `None` when `value` is `None`.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_deref().map(split_patterns)
}

/// A presence-only flag as an override: set means `Some(true)`, absent
/// leaves the configured value alone.
pub fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}

/// Merge an `--enable-x[=BOOL]` / `--disable-x` pair.
pub fn toggle(enable: Option<bool>, disable: bool) -> Option<bool> {
    if disable {
        Some(false)
    } else {
        enable
    }
}

/// stdout writer that goes silent in quiet mode.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    quiet: bool,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn line(&self, text: impl Display) {
        if !self.quiet {
            println!("{text}");
        }
    }

    pub fn blank(&self) {
        self.line("");
    }
}
