//! linestream CLI library
//!
//! This library provides the command-line interface for reading files line
//! by line, from the start or from the end, on top of `linestream-core`.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
