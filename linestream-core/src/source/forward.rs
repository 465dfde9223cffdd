//! Sequential chunk reading from the start of a file

use super::{retry_interrupted, Chunk, ChunkSource, SourceFile, SourceState};
use crate::error::Result;
use crate::handle::FileHandle;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Reads fixed-size windows from file start to end
///
/// The cursor counts bytes consumed from the start. Reads stop at the size
/// recorded when the file was opened, so bytes appended afterwards are not
/// part of the stream.
#[derive(Debug)]
pub struct ForwardChunkSource<H: FileHandle = File> {
    file: SourceFile<H>,
    cursor: u64,
}

impl<H: FileHandle> ForwardChunkSource<H> {
    /// Create an unopened source; the file is opened by [`Self::open`] or the first read
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SourceFile::unopened(path.into()),
            cursor: 0,
        }
    }

    /// Open `path` immediately
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let mut source = Self::new(path);
        source.open()?;
        Ok(source)
    }

    /// Wrap an already open handle
    pub fn from_handle(path: impl Into<PathBuf>, handle: H) -> Result<Self> {
        Ok(Self {
            file: SourceFile::with_handle(path.into(), handle)?,
            cursor: 0,
        })
    }

    /// Open the file and record its size; a no-op once opened
    pub fn open(&mut self) -> Result<()> {
        self.file.open().map(|_| ())
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Bytes read so far from the start of the file
    pub fn bytes_read(&self) -> u64 {
        self.cursor
    }
}

impl<H: FileHandle> ChunkSource for ForwardChunkSource<H> {
    fn next_chunk(&mut self, max_size: usize) -> Result<Option<Chunk>> {
        self.open()?;
        if self.file.state() != SourceState::Open {
            return Ok(None);
        }

        let remaining = self.file.size() - self.cursor;
        if remaining == 0 {
            self.file.finish()?;
            return Ok(None);
        }

        let read_size = (max_size.max(1) as u64).min(remaining) as usize;
        let mut data = vec![0u8; read_size];
        let result = match self.file.handle_mut() {
            Some(handle) => retry_interrupted(|| handle.read(&mut data)),
            None => return Ok(None),
        };

        match result {
            Ok(0) => {
                let err = io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "file ended after {} of {} bytes",
                        self.cursor,
                        self.file.size()
                    ),
                );
                Err(self.file.fail(self.cursor, err))
            }
            Ok(n) => {
                data.truncate(n);
                let chunk = Chunk::new(self.cursor, data);
                self.cursor += n as u64;
                log::trace!(
                    "forward read {} bytes at {} ({}/{})",
                    n,
                    chunk.offset(),
                    self.cursor,
                    self.file.size()
                );
                Ok(Some(chunk))
            }
            Err(err) => Err(self.file.fail(self.cursor, err)),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.file.close()
    }

    fn state(&self) -> SourceState {
        self.file.state()
    }

    fn file_size(&self) -> u64 {
        self.file.size()
    }

    fn bytes_consumed(&self) -> u64 {
        self.cursor
    }
}
