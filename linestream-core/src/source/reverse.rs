//! Positioned chunk reading from the end of a file

use super::{retry_interrupted, Chunk, ChunkSource, SourceFile, SourceState};
use crate::error::Result;
use crate::handle::FileHandle;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Reads fixed-size windows from file end to start
///
/// The cursor is the number of bytes still unread, counted from the start of
/// the file. Each chunk ends exactly where the previous one began.
#[derive(Debug)]
pub struct ReverseChunkSource<H: FileHandle = File> {
    file: SourceFile<H>,
    cursor: u64,
}

impl<H: FileHandle> ReverseChunkSource<H> {
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
        let file = SourceFile::with_handle(path.into(), handle)?;
        let cursor = file.size();
        Ok(Self { file, cursor })
    }

    /// Open the file and start the cursor at its end; a no-op once opened
    pub fn open(&mut self) -> Result<()> {
        if self.file.open()? {
            self.cursor = self.file.size();
        }
        Ok(())
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Bytes not yet read, counted from the start of the file
    pub fn remaining(&self) -> u64 {
        self.cursor
    }
}

impl<H: FileHandle> ChunkSource for ReverseChunkSource<H> {
    fn next_chunk(&mut self, max_size: usize) -> Result<Option<Chunk>> {
        self.open()?;
        if self.file.state() != SourceState::Open {
            return Ok(None);
        }

        if self.cursor == 0 {
            self.file.finish()?;
            return Ok(None);
        }

        let read_size = (max_size.max(1) as u64).min(self.cursor) as usize;
        let start = self.cursor - read_size as u64;
        let mut data = vec![0u8; read_size];

        // A short positioned read leaves a gap before the cursor, so keep
        // reading until the window is full.
        let mut filled = 0;
        while filled < read_size {
            let offset = start + filled as u64;
            let result = match self.file.handle_mut() {
                Some(handle) => retry_interrupted(|| handle.read_at(&mut data[filled..], offset)),
                None => return Ok(None),
            };

            match result {
                Ok(0) => {
                    let err = io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!(
                            "file shrank below {} bytes while reading in reverse",
                            offset
                        ),
                    );
                    return Err(self.file.fail(offset, err));
                }
                Ok(n) => filled += n,
                Err(err) => return Err(self.file.fail(offset, err)),
            }
        }

        self.cursor = start;
        log::trace!(
            "reverse read {} bytes at {} ({} left)",
            read_size,
            start,
            self.cursor
        );
        Ok(Some(Chunk::new(start, data)))
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
        self.file.size() - self.cursor
    }
}
