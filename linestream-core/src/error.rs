//! Error types for line streaming

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors surfaced by chunk sources, assemblers and [`crate::LineStream`]
#[derive(Error, Debug)]
pub enum LineError {
    /// The file is missing or inaccessible
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        /// Path that could not be opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// I/O failure mid-stream; the stream is terminated
    #[error("read failed at byte {offset}: {source}{}", close_suffix(.close))]
    Read {
        /// File offset of the failed read
        offset: u64,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
        /// Secondary failure while releasing the descriptor after the read error
        close: Option<io::Error>,
    },

    /// A line is not valid UTF-8; later lines are unaffected
    #[error("line at byte {offset} is not valid UTF-8: {source}")]
    Decode {
        /// File offset of the first byte of the line
        offset: u64,
        /// The undecoded line
        bytes: Vec<u8>,
        /// Position and kind of the invalid sequence
        #[source]
        source: Utf8Error,
    },

    /// Releasing the descriptor failed
    #[error("failed to close file: {source}")]
    Close {
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Invalid stream configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LineError {
    /// Whether the stream that produced this error has ended
    ///
    /// Decode errors are reported per line and the stream keeps going.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LineError::Decode { .. })
    }

    /// The descriptor release failure carried by this error, if any
    pub fn close_error(&self) -> Option<&io::Error> {
        match self {
            LineError::Read { close, .. } => close.as_ref(),
            LineError::Close { source } => Some(source),
            _ => None,
        }
    }
}

fn close_suffix(close: &Option<io::Error>) -> String {
    match close {
        Some(err) => format!(" (closing the file also failed: {err})"),
        None => String::new(),
    }
}

/// Result type for line streaming operations
pub type Result<T> = std::result::Result<T, LineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_display() {
        let error = LineError::Open {
            path: PathBuf::from("/missing/app.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            error.to_string(),
            "failed to open /missing/app.log: no such file"
        );
        assert!(error.is_fatal());
    }

    #[test]
    fn test_read_error_keeps_primary_cause() {
        let error = LineError::Read {
            offset: 42,
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "file shrank"),
            close: Some(io::Error::new(io::ErrorKind::Other, "bad descriptor")),
        };

        let message = error.to_string();
        assert!(message.starts_with("read failed at byte 42: file shrank"));
        assert!(message.contains("bad descriptor"));

        let source = std::error::Error::source(&error).unwrap();
        assert_eq!(source.to_string(), "file shrank");
        assert_eq!(error.close_error().unwrap().to_string(), "bad descriptor");
    }

    #[test]
    fn test_read_error_without_close_failure() {
        let error = LineError::Read {
            offset: 0,
            source: io::Error::new(io::ErrorKind::Other, "disk gone"),
            close: None,
        };
        assert_eq!(error.to_string(), "read failed at byte 0: disk gone");
        assert!(error.close_error().is_none());
    }

    #[test]
    fn test_decode_error_is_not_fatal() {
        let bytes = vec![b'a', 0xff];
        let source = std::str::from_utf8(&bytes).unwrap_err();
        let error = LineError::Decode {
            offset: 7,
            bytes,
            source,
        };
        assert!(!error.is_fatal());
        assert!(error.to_string().starts_with("line at byte 7 is not valid UTF-8"));
    }

    #[test]
    fn test_config_error_display() {
        let error = LineError::Config("chunk_size must be greater than 0".into());
        assert_eq!(
            error.to_string(),
            "invalid configuration: chunk_size must be greater than 0"
        );
    }
}
