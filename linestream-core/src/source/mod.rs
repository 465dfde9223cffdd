//! Chunk sources: fixed-size byte windows read from a file
//!
//! A source owns one [`FileHandle`] and a cursor. The forward source reads
//! sequentially from the start; the reverse source issues positioned reads
//! walking back from the end. Both close their handle exactly once: on
//! exhaustion, on a read failure, on [`ChunkSource::close`], or on drop.

use crate::error::{LineError, Result};
use crate::handle::FileHandle;
use std::io;
use std::path::{Path, PathBuf};

pub mod forward;
pub mod reverse;

#[cfg(test)]
pub(crate) mod testing;

pub use forward::ForwardChunkSource;
pub use reverse::ReverseChunkSource;

/// Lifecycle of a chunk source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Created but the file is not opened yet
    Unopened,
    /// File open, reads in progress
    Open,
    /// Every byte was read and the handle released
    Exhausted,
    /// Closed before exhaustion
    Closed,
    /// A read failed; the handle was released
    Failed,
}

/// One read's worth of bytes, owned by whoever holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    offset: u64,
    data: Vec<u8>,
}

impl Chunk {
    /// Wrap bytes read at `offset`
    pub fn new(offset: u64, data: Vec<u8>) -> Self {
        Self { offset, data }
    }

    /// File offset of the first byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The chunk bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of bytes in the chunk
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the chunk holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A pull-based producer of chunks
pub trait ChunkSource {
    /// Read the next window of at most `max_size` bytes
    ///
    /// Returns `Ok(None)` once the source is exhausted or closed. A returned
    /// error ends the source.
    fn next_chunk(&mut self, max_size: usize) -> Result<Option<Chunk>>;

    /// Release the file handle; safe to call repeatedly
    fn close(&mut self) -> Result<()>;

    /// Current lifecycle state
    fn state(&self) -> SourceState;

    /// Size of the file recorded at open time
    fn file_size(&self) -> u64;

    /// Bytes handed out so far
    fn bytes_consumed(&self) -> u64;
}

/// Handle bookkeeping shared by both sources
#[derive(Debug)]
pub(crate) struct SourceFile<H: FileHandle> {
    path: PathBuf,
    handle: Option<H>,
    state: SourceState,
    size: u64,
}

impl<H: FileHandle> SourceFile<H> {
    pub(crate) fn unopened(path: PathBuf) -> Self {
        Self {
            path,
            handle: None,
            state: SourceState::Unopened,
            size: 0,
        }
    }

    pub(crate) fn with_handle(path: PathBuf, handle: H) -> Result<Self> {
        let size = match handle.size() {
            Ok(size) => size,
            Err(source) => {
                let _ = handle.close();
                return Err(LineError::Open { path, source });
            }
        };

        log::debug!("opened {} ({} bytes)", path.display(), size);
        Ok(Self {
            path,
            handle: Some(handle),
            state: SourceState::Open,
            size,
        })
    }

    /// Open the file if still unopened; returns whether it was opened now
    pub(crate) fn open(&mut self) -> Result<bool> {
        if self.state != SourceState::Unopened {
            return Ok(false);
        }

        let handle = H::open(&self.path).map_err(|source| LineError::Open {
            path: self.path.clone(),
            source,
        })?;
        *self = Self::with_handle(self.path.clone(), handle)?;
        Ok(true)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn state(&self) -> SourceState {
        self.state
    }

    pub(crate) fn size(&self) -> u64 {
        self.size
    }

    pub(crate) fn handle_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    /// Mark the source exhausted and release the handle
    pub(crate) fn finish(&mut self) -> Result<()> {
        self.state = SourceState::Exhausted;
        log::debug!("finished reading {}", self.path.display());
        self.release()
            .map_err(|source| LineError::Close { source })
    }

    /// Mark the source failed, release the handle, and build the read error
    pub(crate) fn fail(&mut self, offset: u64, source: io::Error) -> LineError {
        self.state = SourceState::Failed;
        let close = self.release().err();
        LineError::Read {
            offset,
            source,
            close,
        }
    }

    pub(crate) fn close(&mut self) -> Result<()> {
        if matches!(self.state, SourceState::Unopened | SourceState::Open) {
            self.state = SourceState::Closed;
        }
        self.release()
            .map_err(|source| LineError::Close { source })
    }

    fn release(&mut self) -> io::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.close(),
            None => Ok(()),
        }
    }
}

impl<H: FileHandle> Drop for SourceFile<H> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(err) = self.close() {
                log::warn!("{}: {}", self.path.display(), err);
            }
        }
    }
}

/// Retry reads interrupted by a signal; any other outcome is returned as is
pub(crate) fn retry_interrupted<F>(mut read: F) -> io::Result<usize>
where
    F: FnMut() -> io::Result<usize>,
{
    loop {
        match read() {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
