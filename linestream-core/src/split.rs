//! Separator splitting over byte buffers
//!
//! Splitting yields index ranges into the caller's buffer rather than copies.
//! The first and last ranges may be partial fragments; every interior range
//! is a complete line.

use memchr::Memchr;
use std::iter::FusedIterator;
use std::ops::Range;

/// Split `buf` on every occurrence of `separator`
///
/// Joining the yielded ranges with the separator reinserted between
/// consecutive ones reconstructs `buf` exactly. A buffer without separators
/// yields a single range covering the whole buffer.
pub fn split_ranges(buf: &[u8], separator: u8) -> SplitRanges<'_> {
    SplitRanges {
        positions: memchr::memchr_iter(separator, buf),
        start: 0,
        end: buf.len(),
        finished: false,
    }
}

/// Split `buf` on `separator`, yielding sub-slices
pub fn split(buf: &[u8], separator: u8) -> impl DoubleEndedIterator<Item = &[u8]> + '_ {
    split_ranges(buf, separator).map(move |range| &buf[range])
}

/// Iterator over separator-delimited ranges of a buffer
///
/// Double-ended: the back yields ranges from the end of the buffer, which is
/// how reverse assembly walks a chunk.
#[derive(Debug)]
pub struct SplitRanges<'a> {
    positions: Memchr<'a>,
    /// Start of the next range taken from the front
    start: usize,
    /// End of the next range taken from the back
    end: usize,
    finished: bool,
}

impl Iterator for SplitRanges<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.finished {
            return None;
        }

        match self.positions.next() {
            Some(position) => {
                let range = self.start..position;
                self.start = position + 1;
                Some(range)
            }
            None => {
                self.finished = true;
                Some(self.start..self.end)
            }
        }
    }
}

impl DoubleEndedIterator for SplitRanges<'_> {
    fn next_back(&mut self) -> Option<Range<usize>> {
        if self.finished {
            return None;
        }

        match self.positions.next_back() {
            Some(position) => {
                let range = position + 1..self.end;
                self.end = position;
                Some(range)
            }
            None => {
                self.finished = true;
                Some(self.start..self.end)
            }
        }
    }
}

impl FusedIterator for SplitRanges<'_> {}
