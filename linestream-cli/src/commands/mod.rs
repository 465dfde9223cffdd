//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod config;
pub mod read;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the lines of one or more files, forwards or backwards
    Read(read::ReadArgs),

    /// Print the default configuration file
    Config(config::ConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Read(args) => args.execute(),
            Commands::Config(args) => args.execute(),
        }
    }
}
