//! Opening input files as line streams

use anyhow::{Context, Result};
use linestream_core::{Direction, LineStream, StreamConfig};
use std::fs;
use std::path::Path;

/// Opens input files with CLI-friendly error context
pub struct FileReader;

impl FileReader {
    /// Open a file as a line stream in the given direction
    pub fn open(path: &Path, direction: Direction, config: &StreamConfig) -> Result<LineStream> {
        let stream = LineStream::open(path, direction, config)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;

        log::info!(
            "reading {} ({} bytes, {})",
            path.display(),
            stream.file_size(),
            direction
        );
        Ok(stream)
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }

    /// Sum of the sizes of all given files
    pub fn total_size(paths: &[impl AsRef<Path>]) -> Result<u64> {
        paths
            .iter()
            .try_fold(0u64, |total, path| Ok(total + Self::file_size(path.as_ref())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_open_reverse() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        fs::write(&file_path, "Hello, world!\nThis is a test.").unwrap();

        let stream =
            FileReader::open(&file_path, Direction::Reverse, &StreamConfig::default()).unwrap();
        let lines: Vec<String> = stream.map(Result::unwrap).collect();
        assert_eq!(lines, vec!["This is a test.", "Hello, world!"]);
    }

    #[test]
    fn test_open_nonexistent_file() {
        let path = Path::new("/nonexistent/file.txt");
        let result = FileReader::open(path, Direction::Forward, &StreamConfig::default());

        let err_msg = format!("{:#}", result.unwrap_err());
        assert!(err_msg.contains("Failed to open file"));
        assert!(err_msg.contains("/nonexistent/file.txt"));
    }

    #[test]
    fn test_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sized.txt");
        fs::write(&file_path, "a".repeat(1024)).unwrap();

        assert_eq!(FileReader::file_size(&file_path).unwrap(), 1024);
    }

    #[test]
    fn test_file_size_nonexistent() {
        let path = Path::new("/nonexistent/file.txt");
        let err_msg = FileReader::file_size(path).unwrap_err().to_string();
        assert!(err_msg.contains("Failed to get metadata"));
    }

    #[test]
    fn test_total_size() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        fs::write(&a, "12345").unwrap();
        File::create(&b).unwrap();

        assert_eq!(FileReader::total_size(&[a, b]).unwrap(), 5);
    }
}
