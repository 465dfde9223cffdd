//! Forward and reverse line streaming over files with bounded memory
//!
//! Lines are read through fixed-size chunks, so a multi-gigabyte log can be
//! walked from either end while holding at most one chunk plus the partial
//! line that straddles a chunk boundary.
//!
//! # Architecture
//!
//! Components, leaf-first:
//! - **Splitter** ([`split`]): separator ranges over a byte buffer
//! - **Chunk sources** ([`source`]): forward sequential reads and reverse
//!   positioned reads over an owned [`FileHandle`]
//! - **Assemblers** ([`assembler`]): stitch chunks into complete lines
//! - **[`LineStream`]**: the public pull-based API over either direction
//!
//! # Example
//!
//! ```rust
//! use linestream_core::{Direction, LineStream, StreamConfig};
//! # let dir = tempfile::tempdir()?;
//! # let path = dir.path().join("app.log");
//! # std::fs::write(&path, "alpha\nbeta\ngamma")?;
//!
//! let config = StreamConfig::builder().chunk_size(4).build()?;
//! let lines = LineStream::open(&path, Direction::Reverse, &config)?
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(lines, ["gamma", "beta", "alpha"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod assembler;
pub mod config;
pub mod error;
pub mod handle;
pub mod source;
pub mod split;
pub mod stream;

pub use assembler::{LineAssembler, RawLine};
pub use config::{StreamConfig, StreamConfigBuilder};
pub use error::{LineError, Result};
pub use handle::FileHandle;
pub use source::{Chunk, ChunkSource, ForwardChunkSource, ReverseChunkSource, SourceState};
pub use split::{split, split_ranges, SplitRanges};
pub use stream::{Direction, LineStream};
