//! Utility functions

use chrono::Local;

/// Timestamp format used in every output filename (`YYYYMMDD_HHMMSS`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Format a byte count with 1024-based units (e.g. 1536 → "1.50 KB").
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    match size {
        s if s >= GB => format!("{:.2} GB", s as f64 / GB as f64),
        s if s >= MB => format!("{:.2} MB", s as f64 / MB as f64),
        s if s >= KB => format!("{:.2} KB", s as f64 / KB as f64),
        s => format!("{s} B"),
    }
}

/// Count lines the way `str.split('\n')` does: an empty string is one line.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}
