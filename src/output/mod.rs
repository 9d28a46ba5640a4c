//! Output directory management and cleaned file writing.

pub mod clean;
pub mod writer;

pub use clean::{clean_json_text, clean_text_content, clean_text_for_file};
pub use writer::{create_output_dir, timestamped_path, write_clean_file, write_clean_json_file};
