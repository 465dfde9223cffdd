//! In-memory file handle for unit tests

use crate::handle::FileHandle;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters shared between a [`MemoryHandle`] and the test that created it
#[derive(Debug, Default)]
pub(crate) struct HandleStats {
    reads: AtomicUsize,
    closes: AtomicUsize,
}

impl HandleStats {
    /// Sequential plus positioned reads issued so far
    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// A file whose bytes live in memory
#[derive(Debug)]
pub(crate) struct MemoryHandle {
    data: Vec<u8>,
    reported_size: u64,
    position: usize,
    max_read: usize,
    fail_after: Option<usize>,
    fail_close: bool,
    stats: Arc<HandleStats>,
}

impl MemoryHandle {
    pub(crate) fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            reported_size: data.len() as u64,
            position: 0,
            max_read: usize::MAX,
            fail_after: None,
            fail_close: false,
            stats: Arc::default(),
        }
    }

    pub(crate) fn stats(&self) -> Arc<HandleStats> {
        Arc::clone(&self.stats)
    }

    /// Report `size` while only `data` is readable, as if the file shrank
    pub(crate) fn reporting_size(mut self, size: u64) -> Self {
        self.reported_size = size;
        self
    }

    /// Cap every read at `max` bytes
    pub(crate) fn short_reads(mut self, max: usize) -> Self {
        self.max_read = max;
        self
    }

    /// Fail every read after the first `reads` succeed
    pub(crate) fn failing_after(mut self, reads: usize) -> Self {
        self.fail_after = Some(reads);
        self
    }

    pub(crate) fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    fn begin_read(&self) -> io::Result<()> {
        let previous = self.stats.reads.fetch_add(1, Ordering::SeqCst);
        match self.fail_after {
            Some(limit) if previous >= limit => {
                Err(io::Error::new(io::ErrorKind::Other, "injected read failure"))
            }
            _ => Ok(()),
        }
    }

    fn copy_from(&self, buf: &mut [u8], offset: usize) -> usize {
        if offset >= self.data.len() {
            return 0;
        }
        let n = buf.len().min(self.max_read).min(self.data.len() - offset);
        buf[..n].copy_from_slice(&self.data[offset..offset + n]);
        n
    }
}

impl FileHandle for MemoryHandle {
    fn open(_path: &Path) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "memory handles are built directly",
        ))
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.reported_size)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.begin_read()?;
        let n = self.copy_from(buf, self.position);
        self.position += n;
        Ok(n)
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.begin_read()?;
        Ok(self.copy_from(buf, offset as usize))
    }

    fn close(self) -> io::Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            Err(io::Error::new(io::ErrorKind::Other, "injected close failure"))
        } else {
            Ok(())
        }
    }
}
