//! Output formatting module

use anyhow::Result;
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Called before the first line of each input file
    fn begin_file(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Format and output a single line
    ///
    /// `number` is the 1-based position of the line in reading order, so
    /// with reverse reading line 1 is the last line of the file.
    fn format_line(&mut self, path: &Path, number: usize, line: &str) -> Result<()>;

    /// Finalize output (e.g., write the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
