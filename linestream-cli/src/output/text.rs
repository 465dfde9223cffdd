//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Plain text formatter - outputs one line per line
pub struct TextFormatter<W: Write> {
    writer: W,
    line_numbers: bool,
    headers: bool,
    files_started: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_numbers: false,
            headers: false,
            files_started: 0,
        }
    }

    /// Prefix each line with its position in reading order
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Print a `==> path <==` header before each file
    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.headers = enabled;
        self
    }

    /// Consume the formatter and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn begin_file(&mut self, path: &Path) -> Result<()> {
        if self.headers {
            if self.files_started > 0 {
                writeln!(self.writer)?;
            }
            writeln!(self.writer, "==> {} <==", path.display())?;
        }
        self.files_started += 1;
        Ok(())
    }

    fn format_line(&mut self, _path: &Path, number: usize, line: &str) -> Result<()> {
        if self.line_numbers {
            writeln!(self.writer, "{number:>6}\t{line}")?;
        } else {
            writeln!(self.writer, "{line}")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
