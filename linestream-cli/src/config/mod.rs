//! Configuration module
//!
//! The optional TOML file supplies defaults; command-line flags win over it.

use crate::error::CliError;
use anyhow::{Context, Result};
use linestream_core::config::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Reading configuration
    #[serde(default)]
    pub reading: ReadingConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Reading-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReadingConfig {
    /// Default reading direction: "forward" or "reverse"
    pub direction: String,

    /// Maximum bytes requested per read
    pub chunk_size: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            direction: "forward".to_string(),
            chunk_size: defaults::CHUNK_SIZE,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format: "text" or "json"
    pub format: String,

    /// Prefix text output with line numbers
    pub line_numbers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            line_numbers: false,
        }
    }
}

impl CliConfig {
    /// Load the configuration file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as a commented TOML document
    pub fn to_toml(&self) -> Result<String> {
        let body = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        Ok(format!("# linestream configuration\n\n{body}"))
    }

    fn validate(&self) -> Result<()> {
        if self.reading.chunk_size == 0 {
            return Err(CliError::ConfigError("chunk_size must be at least 1".into()).into());
        }
        Ok(())
    }
}
