//! Reverse line assembly

use super::{LineAssembler, RawLine};
use crate::config::StreamConfig;
use crate::error::{LineError, Result};
use crate::source::{Chunk, ChunkSource};
use crate::split::split_ranges;
use std::collections::VecDeque;
use std::ops::Range;

/// Emits lines last-to-first from a reverse chunk source
///
/// Chunks arrive in descending file position. Only the new chunk is scanned:
/// its lines are copied out whole, the part after its last separator is joined
/// with the carry, and the part before its first separator becomes the new
/// carry. A carry that spans many chunks is kept as a list of pieces and
/// concatenated once, when its line is complete.
///
/// The final fragment of the file is dropped when empty, matching forward
/// order. The leading fragment is emitted at end of input when it is
/// non-empty or when any separator followed it, so reversing the output
/// gives exactly the forward line sequence.
#[derive(Debug)]
pub struct ReverseAssembler<S: ChunkSource> {
    source: S,
    chunk_size: usize,
    separator: u8,
    /// Complete lines in file order; handed out from the back
    complete: VecDeque<RawLine>,
    /// Partial line, latest piece last; each piece precedes the one before it
    carry: Vec<Vec<u8>>,
    /// File offset of the start of the carry
    carry_offset: u64,
    /// Set once the first separator (the last one in the file) is seen
    seen_separator: bool,
    ended: bool,
    /// Close failure reported after the final line
    deferred: Option<LineError>,
}

impl<S: ChunkSource> ReverseAssembler<S> {
    /// Assemble lines from `source` using the chunk size and separator in `config`
    pub fn new(source: S, config: &StreamConfig) -> Self {
        Self {
            source,
            chunk_size: config.chunk_size(),
            separator: config.separator(),
            complete: VecDeque::new(),
            carry: Vec::new(),
            carry_offset: 0,
            seen_separator: false,
            ended: false,
            deferred: None,
        }
    }

    /// The underlying chunk source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn absorb(&mut self, chunk: Chunk) {
        let offset = chunk.offset();
        let mut data = chunk.into_bytes();

        let mut ranges = split_ranges(&data, self.separator);
        let head = ranges.next().unwrap_or(0..0);
        let mut inner: Vec<Range<usize>> = ranges.collect();

        let Some(tail) = inner.pop() else {
            // No separator: the whole chunk continues the carry.
            self.carry.push(data);
            self.carry_offset = offset;
            return;
        };

        let joined = self.take_carry(offset + tail.start as u64, &data[tail]);
        self.complete.extend(inner.into_iter().map(|range| RawLine {
            offset: offset + range.start as u64,
            bytes: data[range].to_vec(),
        }));

        if self.seen_separator || !joined.bytes.is_empty() {
            self.complete.push_back(joined);
        }
        self.seen_separator = true;

        data.truncate(head.end);
        self.carry.push(data);
        self.carry_offset = offset;
    }

    /// Build the line `prefix + carry` starting at `offset` and clear the carry
    fn take_carry(&mut self, offset: u64, prefix: &[u8]) -> RawLine {
        let len = prefix.len() + self.carry.iter().map(Vec::len).sum::<usize>();
        let mut bytes = Vec::with_capacity(len);
        bytes.extend_from_slice(prefix);
        for piece in self.carry.drain(..).rev() {
            bytes.extend_from_slice(&piece);
        }
        RawLine { offset, bytes }
    }

    fn finish(&mut self) -> Result<Option<RawLine>> {
        let first_line_pending = std::mem::take(&mut self.seen_separator);
        let line = self.take_carry(self.carry_offset, &[]);
        if !line.bytes.is_empty() || first_line_pending {
            return Ok(Some(line));
        }

        match self.deferred.take() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    fn abandon(&mut self) {
        self.ended = true;
        self.complete.clear();
        self.carry.clear();
        self.seen_separator = false;
    }
}

impl<S: ChunkSource> LineAssembler for ReverseAssembler<S> {
    fn next_line(&mut self) -> Result<Option<RawLine>> {
        loop {
            if let Some(line) = self.complete.pop_back() {
                return Ok(Some(line));
            }

            if self.ended {
                return self.finish();
            }

            match self.source.next_chunk(self.chunk_size) {
                Ok(Some(chunk)) => self.absorb(chunk),
                Ok(None) => self.ended = true,
                Err(err @ LineError::Close { .. }) => {
                    self.ended = true;
                    self.deferred = Some(err);
                }
                Err(err) => {
                    self.abandon();
                    return Err(err);
                }
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        self.abandon();
        self.source.close()?;
        self.deferred.take().map_or(Ok(()), Err)
    }

    fn bytes_processed(&self) -> u64 {
        self.source.bytes_consumed()
    }

    fn file_size(&self) -> u64 {
        self.source.file_size()
    }
}
