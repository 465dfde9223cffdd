//! Public line streaming API

use crate::assembler::{ForwardAssembler, LineAssembler, RawLine, ReverseAssembler};
use crate::config::StreamConfig;
use crate::error::{LineError, Result};
use crate::handle::FileHandle;
use crate::source::{ForwardChunkSource, ReverseChunkSource};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Order in which lines are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// First line first
    #[default]
    Forward,
    /// Last line first
    Reverse,
}

impl Direction {
    /// Lowercase name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "fwd" => Ok(Direction::Forward),
            "reverse" | "rev" | "backward" => Ok(Direction::Reverse),
            other => Err(LineError::Config(format!("unknown direction: {other}"))),
        }
    }
}

/// A pull-based sequence of lines read from one file
///
/// The stream owns its file descriptor. Dropping it, or calling
/// [`LineStream::close`], releases the descriptor and stops all reads.
///
/// ```no_run
/// use linestream_core::LineStream;
///
/// let mut lines = LineStream::open_reverse("/var/log/app.log")?;
/// while let Some(line) = lines.next_line()? {
///     println!("{line}");
/// }
/// # Ok::<(), linestream_core::LineError>(())
/// ```
pub struct LineStream {
    assembler: Box<dyn LineAssembler + Send>,
    direction: Direction,
    path: PathBuf,
    closed: bool,
}

impl fmt::Debug for LineStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineStream")
            .field("path", &self.path)
            .field("direction", &self.direction)
            .field("file_size", &self.file_size())
            .field("bytes_processed", &self.bytes_processed())
            .field("closed", &self.closed)
            .finish()
    }
}

impl LineStream {
    /// Stream lines first-to-last with the default configuration
    pub fn open_forward(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, Direction::Forward, &StreamConfig::default())
    }

    /// Stream lines last-to-first with the default configuration
    pub fn open_reverse(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, Direction::Reverse, &StreamConfig::default())
    }

    /// Open `path` for streaming in `direction`
    ///
    /// The file is opened and its size recorded before returning, so a
    /// missing or unreadable file fails here with [`LineError::Open`].
    pub fn open(
        path: impl AsRef<Path>,
        direction: Direction,
        config: &StreamConfig,
    ) -> Result<Self> {
        Self::open_with::<File>(path, direction, config)
    }

    /// Like [`LineStream::open`], with a custom [`FileHandle`] implementation
    pub fn open_with<H>(
        path: impl AsRef<Path>,
        direction: Direction,
        config: &StreamConfig,
    ) -> Result<Self>
    where
        H: FileHandle + Send + 'static,
    {
        config.validate()?;
        let path = path.as_ref().to_path_buf();
        let handle = H::open(&path).map_err(|source| LineError::Open {
            path: path.clone(),
            source,
        })?;
        Self::from_handle(path, handle, direction, config)
    }

    /// Stream from an already open handle
    pub fn from_handle<H>(
        path: impl Into<PathBuf>,
        handle: H,
        direction: Direction,
        config: &StreamConfig,
    ) -> Result<Self>
    where
        H: FileHandle + Send + 'static,
    {
        config.validate()?;
        let path = path.into();

        let assembler: Box<dyn LineAssembler + Send> = match direction {
            Direction::Forward => {
                let source = ForwardChunkSource::from_handle(path.clone(), handle)?;
                Box::new(ForwardAssembler::new(source, config))
            }
            Direction::Reverse => {
                let source = ReverseChunkSource::from_handle(path.clone(), handle)?;
                Box::new(ReverseAssembler::new(source, config))
            }
        };

        Ok(Self {
            assembler,
            direction,
            path,
            closed: false,
        })
    }

    /// Next line as UTF-8 text, or `None` at end of stream
    ///
    /// A line that is not valid UTF-8 yields [`LineError::Decode`]; the
    /// following call continues with the next line. Any other error ends the
    /// stream.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        match self.next_raw()? {
            Some(line) => decode(line).map(Some),
            None => Ok(None),
        }
    }

    /// Next line with invalid UTF-8 replaced by U+FFFD
    pub fn next_line_lossy(&mut self) -> Result<Option<String>> {
        Ok(self
            .next_raw()?
            .map(|line| match String::from_utf8(line.bytes) {
                Ok(text) => text,
                Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
            }))
    }

    /// Next line as undecoded bytes
    pub fn next_line_bytes(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.next_raw()?.map(|line| line.bytes))
    }

    fn next_raw(&mut self) -> Result<Option<RawLine>> {
        if self.closed {
            return Ok(None);
        }
        self.assembler.next_line()
    }

    /// Size of the file in bytes, recorded when it was opened
    pub fn file_size(&self) -> u64 {
        self.assembler.file_size()
    }

    /// Bytes read from the file so far; equals [`Self::file_size`] once exhausted
    pub fn bytes_processed(&self) -> u64 {
        self.assembler.bytes_processed()
    }

    /// Direction this stream reads in
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Path the stream was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`Self::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stop reading and release the file; safe to call more than once
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        log::debug!(
            "closing {} after {} of {} bytes",
            self.path.display(),
            self.bytes_processed(),
            self.file_size()
        );
        self.assembler.close()
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

fn decode(line: RawLine) -> Result<String> {
    String::from_utf8(line.bytes).map_err(|err| {
        let source = err.utf8_error();
        LineError::Decode {
            offset: line.offset,
            bytes: err.into_bytes(),
            source,
        }
    })
}
