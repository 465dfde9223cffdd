//! Forward line assembly

use super::{LineAssembler, RawLine};
use crate::config::StreamConfig;
use crate::error::{LineError, Result};
use crate::source::{Chunk, ChunkSource};
use crate::split::split_ranges;
use std::collections::VecDeque;
use std::ops::Range;

/// Emits lines in file order from a forward chunk source
///
/// Each chunk is appended after the carry and split. Every range but the last
/// is a complete line; the last becomes the new carry. At end of input a
/// non-empty carry is the final line, so a file ending in a separator yields
/// no trailing empty line.
#[derive(Debug)]
pub struct ForwardAssembler<S: ChunkSource> {
    source: S,
    chunk_size: usize,
    separator: u8,
    /// Carry followed by the latest chunk
    buffer: Vec<u8>,
    /// File offset of `buffer[0]`
    buffer_offset: u64,
    /// Complete lines not yet handed out, in file order
    complete: VecDeque<Range<usize>>,
    carry: Range<usize>,
    ended: bool,
    /// Close failure reported after the final line
    deferred: Option<LineError>,
}

impl<S: ChunkSource> ForwardAssembler<S> {
    /// Assemble lines from `source` using the chunk size and separator in `config`
    pub fn new(source: S, config: &StreamConfig) -> Self {
        Self {
            source,
            chunk_size: config.chunk_size(),
            separator: config.separator(),
            buffer: Vec::new(),
            buffer_offset: 0,
            complete: VecDeque::new(),
            carry: 0..0,
            ended: false,
            deferred: None,
        }
    }

    /// The underlying chunk source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn absorb(&mut self, chunk: Chunk) {
        let carry_len = self.carry.len();
        self.buffer_offset = chunk.offset() - carry_len as u64;

        if carry_len == 0 {
            self.buffer = chunk.into_bytes();
        } else {
            // Move the carry to the front before the consumed prefix is dropped.
            self.buffer.drain(..self.carry.start);
            self.buffer.truncate(carry_len);
            self.buffer.extend_from_slice(chunk.as_bytes());
        }

        // The carry holds no separator, so only the new bytes are scanned; the
        // first range found there starts at the carry.
        let mut ranges = split_ranges(&self.buffer[carry_len..], self.separator)
            .map(|range| range.start + carry_len..range.end + carry_len);
        if let Some(first) = ranges.next() {
            self.complete.push_back(0..first.end);
        }
        self.complete.extend(ranges);
        self.carry = self.complete.pop_back().unwrap_or(0..0);
    }

    fn take(&self, range: Range<usize>) -> RawLine {
        RawLine {
            offset: self.buffer_offset + range.start as u64,
            bytes: self.buffer[range].to_vec(),
        }
    }

    fn finish(&mut self) -> Result<Option<RawLine>> {
        let carry = std::mem::replace(&mut self.carry, 0..0);
        if !carry.is_empty() {
            return Ok(Some(self.take(carry)));
        }

        match self.deferred.take() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }

    fn abandon(&mut self) {
        self.ended = true;
        self.complete.clear();
        self.carry = 0..0;
        self.buffer = Vec::new();
    }
}

impl<S: ChunkSource> LineAssembler for ForwardAssembler<S> {
    fn next_line(&mut self) -> Result<Option<RawLine>> {
        loop {
            if let Some(range) = self.complete.pop_front() {
                return Ok(Some(self.take(range)));
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
