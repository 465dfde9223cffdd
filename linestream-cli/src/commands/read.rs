//! Read command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use linestream_core::{Direction, StreamConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the read command
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Read from the last line to the first
    #[arg(short, long, conflicts_with = "forward")]
    pub reverse: bool,

    /// Read from the first line to the last, overriding the config file
    #[arg(long)]
    pub forward: bool,

    /// Maximum kilobytes requested per read
    #[arg(long, value_name = "KB")]
    pub chunk_kb: Option<usize>,

    /// Stop after this many lines per file
    #[arg(short = 'n', long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Prefix each text line with its position in reading order
    #[arg(long)]
    pub line_numbers: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Replace invalid UTF-8 instead of skipping the line
    #[arg(long)]
    pub lossy: bool,

    /// Show a byte progress bar on stderr
    #[arg(long)]
    pub progress: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one line per line
    Text,
    /// JSON array of lines with file and position
    Json,
}

/// Effective settings after merging the config file with flags
#[derive(Debug, Clone, PartialEq)]
pub struct ReadSettings {
    /// Reading direction
    pub direction: Direction,
    /// Stream configuration passed to every file
    pub stream: StreamConfig,
    /// Output format
    pub format: OutputFormat,
    /// Number text output lines
    pub line_numbers: bool,
}

impl ReadArgs {
    /// Execute the read command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting line reading");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let settings = self.settings(&config)?;
        let files = resolve_patterns(&self.input)?;
        log::info!("Reading {} file(s) {}", files.len(), settings.direction);

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        let mut formatter: Box<dyn OutputFormatter> = match settings.format {
            OutputFormat::Text => Box::new(
                TextFormatter::new(writer)
                    .with_line_numbers(settings.line_numbers)
                    .with_headers(files.len() > 1),
            ),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };

        let mut progress = ProgressReporter::new(self.progress && !self.quiet);
        progress.init_bytes(FileReader::total_size(&files)?)?;

        let mut skipped = 0;
        for path in &files {
            skipped += self.read_file(path, &settings, formatter.as_mut(), &mut progress)?;
        }

        formatter.finish()?;
        progress.finish();

        if skipped > 0 {
            log::warn!("Skipped {skipped} line(s) that were not valid UTF-8");
        }
        Ok(())
    }

    /// Merge the configuration file with command-line flags
    pub fn settings(&self, config: &CliConfig) -> Result<ReadSettings> {
        let direction = if self.reverse {
            Direction::Reverse
        } else if self.forward {
            Direction::Forward
        } else {
            config
                .reading
                .direction
                .parse()
                .map_err(|e| CliError::ConfigError(format!("{e}")))?
        };

        let chunk_size = match self.chunk_kb {
            Some(0) => {
                return Err(CliError::ConfigError("--chunk-kb must be at least 1".into()).into())
            }
            Some(kb) => kb.saturating_mul(1024),
            None => config.reading.chunk_size,
        };
        let stream = StreamConfig::builder().chunk_size(chunk_size).build()?;

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_str(&config.output.format, true).map_err(|e| {
                CliError::ConfigError(format!("unknown output format: {e}"))
            })?,
        };

        Ok(ReadSettings {
            direction,
            stream,
            format,
            line_numbers: self.line_numbers || config.output.line_numbers,
        })
    }

    /// Stream one file into the formatter, returning the number of skipped lines
    fn read_file(
        &self,
        path: &Path,
        settings: &ReadSettings,
        formatter: &mut dyn OutputFormatter,
        progress: &mut ProgressReporter,
    ) -> Result<usize> {
        let mut lines = FileReader::open(path, settings.direction, &settings.stream)?;
        formatter.begin_file(path)?;

        let mut position = 0;
        let mut emitted = 0;
        let mut skipped = 0;

        while self.max_lines.map_or(true, |max| emitted < max) {
            let next = if self.lossy {
                lines.next_line_lossy()
            } else {
                lines.next_line()
            };

            match next {
                Ok(Some(line)) => {
                    position += 1;
                    emitted += 1;
                    formatter.format_line(path, position, &line)?;
                }
                Ok(None) => break,
                Err(err) if !err.is_fatal() => {
                    position += 1;
                    skipped += 1;
                    log::warn!("{}: {err}", path.display());
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("Failed to read file: {}", path.display()))
                }
            }
            progress.file_progress(lines.bytes_processed());
        }

        log::debug!(
            "{}: {emitted} line(s) after {} of {} bytes",
            path.display(),
            lines.bytes_processed(),
            lines.file_size()
        );
        let file_size = lines.file_size();
        lines
            .close()
            .with_context(|| format!("Failed to close file: {}", path.display()))?;
        progress.file_completed(&path.display().to_string(), file_size);

        Ok(skipped)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run more than once in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
