//! batch_replay library: batch HTTP replay of delimited records
//!
//! This library reads delimited records from an input file, binds each row to
//! a JSON-configured request template, dispatches the resulting HTTP requests
//! sequentially, and writes the classified outcomes to files next to the
//! input.
//!
//! # Example
//!
//! ```no_run
//! use batch_replay::{run_replay, ReplayOptions};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ReplayOptions {
//!     input_file: PathBuf::from("records.tsv"),
//!     config_path: PathBuf::from("config.json"),
//!     ..Default::default()
//! };
//!
//! let report = run_replay(options).await?;
//! println!("Replayed {} records: {} succeeded, {} failed",
//!          report.total_records, report.successful, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod dispatch;
mod error_handling;
pub mod initialization;
mod mapping;
mod output;
mod parse;
mod process;
mod request;

// Re-export public API
pub use config::{load_api_config, ApiConfig, ConfigError, LogFormat, LogLevel, ReplayOptions};
pub use run::{run_replay, ReplayReport};

// Internal run module (contains the main replay logic)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use log::{info, warn};

    use crate::config::{load_api_config, ReplayOptions, ERROR_FILE_SUFFIX, RESPONSE_FILE_SUFFIX};
    use crate::dispatch::{Dispatcher, DryRunDispatcher, HttpDispatcher};
    use crate::error_handling::DiagnosticStats;
    use crate::initialization::init_client;
    use crate::output::write_outcomes;
    use crate::parse::RecordParser;
    use crate::process::{BatchAbort, BatchProcessor};

    /// Results of one replay run.
    ///
    /// Contains summary statistics and the paths of the written outcome
    /// files.
    #[derive(Debug, Clone)]
    pub struct ReplayReport {
        /// Total number of records replayed
        pub total_records: usize,
        /// Number of records whose response fell in the success range
        pub successful: usize,
        /// Number of records whose response fell outside it
        pub failed: usize,
        /// Path of the file holding the success lines
        pub response_path: PathBuf,
        /// Path of the file holding the failure lines
        pub error_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Replays the records of one input file against the configured API.
    ///
    /// This is the main entry point for the library. It loads the request
    /// template, parses the input file into request descriptors, dispatches
    /// them in order, and writes the classified outcome lines next to the
    /// input file.
    ///
    /// # Arguments
    ///
    /// * `options` - Run options (input file, template path, delay, dry run)
    ///
    /// # Returns
    ///
    /// Returns a `ReplayReport` with summary statistics, or an error if the
    /// run could not complete.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The request template cannot be loaded
    /// - The input file cannot be read or a record cannot be bound
    /// - A request fails at the network level (the outcomes accumulated
    ///   before the failure are still written out)
    /// - An outcome file cannot be written
    ///
    /// # Example
    ///
    /// ```no_run
    /// use batch_replay::{run_replay, ReplayOptions};
    /// use std::path::PathBuf;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let options = ReplayOptions {
    ///     input_file: PathBuf::from("records.tsv"),
    ///     ..Default::default()
    /// };
    /// let report = run_replay(options).await?;
    /// println!("Replayed {} records", report.total_records);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_replay(options: ReplayOptions) -> Result<ReplayReport> {
        let api_config = load_api_config(&options.config_path).with_context(|| {
            format!(
                "Failed to load request template {}",
                options.config_path.display()
            )
        })?;

        info!("Processing input file: {}", options.input_file.display());

        let start_time = Instant::now();
        let stats = Arc::new(DiagnosticStats::new());
        let parser = RecordParser::new(api_config, Arc::clone(&stats));

        let requests = match parser.read_and_parse(&options.input_file) {
            Ok(requests) => requests,
            Err(abort) => {
                if !abort.built.is_empty() {
                    warn!(
                        "{} records were already built when parsing failed; none were dispatched",
                        abort.built.len()
                    );
                }
                return Err(abort.source).context("Failed to parse input records");
            }
        };
        info!("Parsed {} records", requests.len());

        let dispatcher: Box<dyn Dispatcher> = if options.dry_run {
            info!("Dry run: no requests will be sent");
            Box::new(DryRunDispatcher)
        } else {
            let client =
                init_client(options.timeout_seconds).context("Failed to initialize HTTP client")?;
            Box::new(HttpDispatcher::new(client))
        };

        let processor = BatchProcessor::new(dispatcher, Duration::from_millis(options.sleep_ms));

        let output = match processor.process_all(&requests).await {
            Ok(output) => output,
            Err(abort) => {
                warn!(
                    "Batch aborted at record {}; writing the {} outcome(s) accumulated so far",
                    abort.index,
                    abort.partial.successes.len() + abort.partial.failures.len()
                );
                if let Err(e) =
                    write_outcomes(&options.input_file, &abort.partial.failures, ERROR_FILE_SUFFIX)
                {
                    warn!("Failed to write failure output file: {}", e);
                }
                if let Err(e) = write_outcomes(
                    &options.input_file,
                    &abort.partial.successes,
                    RESPONSE_FILE_SUFFIX,
                ) {
                    warn!("Failed to write success output file: {}", e);
                }
                stats.log_summary();

                let BatchAbort { index, source, .. } = abort;
                return Err(source).with_context(|| format!("Batch aborted at record {}", index));
            }
        };
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        let error_path = write_outcomes(&options.input_file, &output.failures, ERROR_FILE_SUFFIX)
            .context("Failed to write failure output file")?;
        let response_path = write_outcomes(
            &options.input_file,
            &output.successes,
            RESPONSE_FILE_SUFFIX,
        )
        .context("Failed to write success output file")?;

        stats.log_summary();
        info!(
            "Replayed {} records in {:.1}s: {} succeeded, {} failed",
            requests.len(),
            elapsed_seconds,
            output.successes.len(),
            output.failures.len()
        );

        Ok(ReplayReport {
            total_records: requests.len(),
            successful: output.successes.len(),
            failed: output.failures.len(),
            response_path,
            error_path,
            elapsed_seconds,
        })
    }
}
