//! Line assembly across chunk boundaries
//!
//! An assembler pulls chunks from a [`ChunkSource`](crate::source::ChunkSource),
//! keeps the fragment whose separator has not been seen yet as a carry, and
//! hands out complete lines one at a time.

use crate::error::Result;

pub mod forward;
pub mod reverse;

pub use forward::ForwardAssembler;
pub use reverse::ReverseAssembler;

/// An undecoded line and where it starts in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// File offset of the first byte
    pub offset: u64,
    /// Line bytes without the separator
    pub bytes: Vec<u8>,
}

/// Pull-based line producer
pub trait LineAssembler {
    /// Next complete line, or `None` once the stream has ended
    fn next_line(&mut self) -> Result<Option<RawLine>>;

    /// Stop the stream and release the underlying file
    fn close(&mut self) -> Result<()>;

    /// Bytes read from the file so far
    fn bytes_processed(&self) -> u64;

    /// Size of the file recorded at open time
    fn file_size(&self) -> u64;
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::error::{LineError, Result};
    use crate::source::{Chunk, ChunkSource, SourceState};
    use std::collections::VecDeque;
    use std::io;

    /// Chunk source replaying fixed windows of a buffer in either direction
    pub(crate) struct ScriptedSource {
        chunks: VecDeque<Chunk>,
        size: u64,
        consumed: u64,
        state: SourceState,
        fail_at_end: bool,
        close_error_at_end: bool,
        pub(crate) pulls: usize,
    }

    impl ScriptedSource {
        pub(crate) fn forward(data: &[u8], window: usize) -> Self {
            let chunks = data
                .chunks(window)
                .scan(0u64, |offset, piece| {
                    let chunk = Chunk::new(*offset, piece.to_vec());
                    *offset += piece.len() as u64;
                    Some(chunk)
                })
                .collect();
            Self::with_chunks(chunks, data.len() as u64)
        }

        pub(crate) fn reverse(data: &[u8], window: usize) -> Self {
            let mut chunks = VecDeque::new();
            let mut end = data.len();
            while end > 0 {
                let start = end.saturating_sub(window);
                chunks.push_back(Chunk::new(start as u64, data[start..end].to_vec()));
                end = start;
            }
            Self::with_chunks(chunks, data.len() as u64)
        }

        fn with_chunks(chunks: VecDeque<Chunk>, size: u64) -> Self {
            Self {
                chunks,
                size,
                consumed: 0,
                state: SourceState::Open,
                fail_at_end: false,
                close_error_at_end: false,
                pulls: 0,
            }
        }

        /// Return a read error instead of end-of-stream
        pub(crate) fn failing_at_end(mut self) -> Self {
            self.fail_at_end = true;
            self
        }

        /// Report a close failure when the source is exhausted
        pub(crate) fn close_error_at_end(mut self) -> Self {
            self.close_error_at_end = true;
            self
        }
    }

    impl ChunkSource for ScriptedSource {
        fn next_chunk(&mut self, _max_size: usize) -> Result<Option<Chunk>> {
            if self.state != SourceState::Open {
                return Ok(None);
            }
            self.pulls += 1;

            match self.chunks.pop_front() {
                Some(chunk) => {
                    self.consumed += chunk.len() as u64;
                    Ok(Some(chunk))
                }
                None if self.fail_at_end => {
                    self.state = SourceState::Failed;
                    Err(LineError::Read {
                        offset: self.consumed,
                        source: io::Error::new(io::ErrorKind::Other, "scripted failure"),
                        close: None,
                    })
                }
                None => {
                    self.state = SourceState::Exhausted;
                    if self.close_error_at_end {
                        Err(LineError::Close {
                            source: io::Error::new(io::ErrorKind::Other, "scripted close"),
                        })
                    } else {
                        Ok(None)
                    }
                }
            }
        }

        fn close(&mut self) -> Result<()> {
            if self.state == SourceState::Open {
                self.state = SourceState::Closed;
            }
            Ok(())
        }

        fn state(&self) -> SourceState {
            self.state
        }

        fn file_size(&self) -> u64 {
            self.size
        }

        fn bytes_consumed(&self) -> u64 {
            self.consumed
        }
    }
}
