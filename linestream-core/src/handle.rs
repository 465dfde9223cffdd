//! File descriptor abstraction used by the chunk sources

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// An open, readable file owned by exactly one chunk source
///
/// Implemented for [`std::fs::File`]. Test doubles implement it to count
/// reads or inject failures.
pub trait FileHandle: Sized {
    /// Open the file at `path` for reading
    fn open(path: &Path) -> io::Result<Self>;

    /// Total size of the file in bytes
    fn size(&self) -> io::Result<u64>;

    /// Sequential read from the current position
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Positioned read that leaves the sequential position untouched
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Release the descriptor
    ///
    /// The [`File`] implementation always succeeds because std drops the
    /// descriptor without reporting errors, so [`crate::LineError::Close`]
    /// only arises from handles that can report a failed release.
    fn close(self) -> io::Result<()>;
}

impl FileHandle for File {
    fn open(path: &Path) -> io::Result<Self> {
        File::open(path)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    #[cfg(unix)]
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    // seek_read moves the file cursor on Windows; reverse sources never read
    // sequentially so that is harmless here.
    #[cfg(windows)]
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }

    #[cfg(not(any(unix, windows)))]
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        use std::io::{Seek, SeekFrom};
        self.seek(SeekFrom::Start(offset))?;
        Read::read(self, buf)
    }

    fn close(self) -> io::Result<()> {
        // std reports no error from close(2); dropping releases the descriptor.
        drop(self);
        Ok(())
    }
}
