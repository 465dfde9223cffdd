//! Stream configuration

use crate::error::{LineError, Result};

/// Default configuration constants
pub mod defaults {
    /// Default maximum bytes per read (about 5MB)
    pub const CHUNK_SIZE: usize = 5_000_000;

    /// Default line separator
    pub const SEPARATOR: u8 = b'\n';
}

/// Configuration shared by forward and reverse streams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    pub(crate) chunk_size: usize, // in bytes
    pub(crate) separator: u8,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: defaults::CHUNK_SIZE,
            separator: defaults::SEPARATOR,
        }
    }
}

impl StreamConfig {
    /// Create a configuration builder
    pub fn builder() -> StreamConfigBuilder {
        StreamConfigBuilder::default()
    }

    /// Default configuration with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        Self::builder().chunk_size(chunk_size).build()
    }

    /// Maximum bytes requested per read
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Byte that terminates a line
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(LineError::Config(
                "chunk_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`StreamConfig`]
#[derive(Debug, Default)]
pub struct StreamConfigBuilder {
    chunk_size: Option<usize>,
    separator: Option<u8>,
}

impl StreamConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size in bytes
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the chunk size in kilobytes
    pub fn chunk_kb(self, kb: usize) -> Self {
        self.chunk_size(kb.saturating_mul(1024))
    }

    /// Set the separator byte
    pub fn separator(mut self, byte: u8) -> Self {
        self.separator = Some(byte);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StreamConfig> {
        let mut config = StreamConfig::default();

        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }

        if let Some(separator) = self.separator {
            config.separator = separator;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.chunk_size(), 5_000_000);
        assert_eq!(config.separator(), b'\n');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = StreamConfig::builder()
            .chunk_size(64)
            .separator(b'\0')
            .build()
            .unwrap();
        assert_eq!(config.chunk_size(), 64);
        assert_eq!(config.separator(), b'\0');
    }

    #[test]
    fn test_chunk_kb() {
        let config = StreamConfig::builder().chunk_kb(4).build().unwrap();
        assert_eq!(config.chunk_size(), 4096);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = StreamConfig::with_chunk_size(0);
        assert!(matches!(result, Err(LineError::Config(_))));
    }

    #[test]
    fn test_one_byte_chunk_allowed() {
        let config = StreamConfig::with_chunk_size(1).unwrap();
        assert_eq!(config.chunk_size(), 1);
    }
}
