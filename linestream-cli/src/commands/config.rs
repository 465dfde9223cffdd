//! Config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the config command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the configuration to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self) -> Result<()> {
        let template = CliConfig::default().to_toml()?;

        match &self.output {
            Some(path) => {
                fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("Configuration written to {}", path.display());
                eprintln!("Use it with: linestream read -c {} -i <FILE>", path.display());
            }
            None => print!("{template}"),
        }

        Ok(())
    }
}
