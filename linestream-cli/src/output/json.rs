//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// JSON formatter - streams lines as a pretty-printed JSON array
///
/// Each record is written as soon as it arrives, so memory use does not grow
/// with the number of lines.
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: usize,
}

/// Data structure for JSON output
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// File the line was read from
    pub file: String,
    /// 1-based position of the line in reading order
    pub line: usize,
    /// The line text without its separator
    pub text: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Consume the formatter and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, path: &Path, number: usize, line: &str) -> Result<()> {
        let record = LineRecord {
            file: path.display().to_string(),
            line: number,
            text: line.to_string(),
        };

        let separator = if self.records == 0 { "[\n  " } else { ",\n  " };
        self.writer.write_all(separator.as_bytes())?;
        serde_json::to_writer(&mut self.writer, &record)?;
        self.records += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.records == 0 {
            writeln!(self.writer, "[]")?;
        } else {
            writeln!(self.writer, "\n]")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
