//! Configuration types and CLI options.
//!
//! This module defines the enums and structs used for command-line argument
//! parsing and run configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_CONFIG_PATH, DEFAULT_SLEEP_MS, DEFAULT_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Options for one replay run.
///
/// Doubles as the CLI surface (via `clap`) and the programmatic entry point:
/// every field except the input file has a default, so library callers can
/// fill in only what they need.
///
/// # Examples
///
/// ```no_run
/// use batch_replay::ReplayOptions;
/// use std::path::PathBuf;
///
/// let options = ReplayOptions {
///     input_file: PathBuf::from("records.tsv"),
///     dry_run: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "batch_replay",
    about = "Replays delimited records from a file as HTTP requests against an API."
)]
pub struct ReplayOptions {
    /// File of delimited records to replay
    pub input_file: PathBuf,

    /// Path of the JSON request template
    #[arg(long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,

    /// Log each request instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Delay between requests in milliseconds
    #[arg(long, default_value_t = DEFAULT_SLEEP_MS)]
    pub sleep_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from("records.tsv"),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            dry_run: false,
            sleep_ms: DEFAULT_SLEEP_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
