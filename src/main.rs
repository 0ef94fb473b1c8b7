//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `batch_replay` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use batch_replay::initialization::init_logger_with;
use batch_replay::{run_replay, ReplayOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into ReplayOptions
    let options = ReplayOptions::parse();

    // Initialize logger based on options
    let log_level = options.log_level.clone();
    let log_format = options.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the replay using the library
    match run_replay(options).await {
        Ok(report) => {
            // Print user-friendly summary
            println!(
                "✅ Replayed {} record{} ({} succeeded, {} failed) in {:.1}s",
                report.total_records,
                if report.total_records == 1 { "" } else { "s" },
                report.successful,
                report.failed,
                report.elapsed_seconds
            );
            println!(
                "Successes saved in {}, failures in {}",
                report.response_path.display(),
                report.error_path.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("batch_replay error: {:#}", e);
            process::exit(1);
        }
    }
}
