//! Error types and run diagnostics.
//!
//! Defines the error enums used across the application plus the counters
//! for non-fatal conditions reported at the end of a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for loading the request template.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// Error reading the template file.
    #[error("Template read error: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error deserializing the template file.
    #[error("Template parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Error binding a record's columns to the configured variables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The record has fewer columns than the configured bindings need.
    #[error("not enough columns in the record: need {required}, row has {actual}")]
    NotEnoughColumns {
        /// Columns the failing binding needs.
        required: usize,
        /// Columns the record actually has.
        actual: usize,
    },
}

/// Error types for reading and parsing the input record file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Error reading the input file.
    #[error("Input file read error: {0}")]
    ReadError(#[from] std::io::Error),

    /// The delimited reader failed on a row.
    #[error("Record read error: {0}")]
    MalformedRecord(#[from] csv::Error),

    /// A record could not be bound to the configured variables.
    #[error("Request construction error for record {index}: {source}")]
    RequestConstruction {
        /// 0-based position of the failing record.
        index: usize,
        /// The underlying binding failure.
        #[source]
        source: MappingError,
    },
}

/// Error types for dispatching a single request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The configured HTTP verb is not a valid method token.
    #[error("Invalid HTTP method {0:?}")]
    InvalidMethod(String),

    /// The request could not be delivered (connect, DNS, TLS, timeout).
    #[error("error making request: {0}")]
    Network(#[from] ReqwestError),

    /// The response arrived but its body could not be read.
    #[error("error reading response body: {0}")]
    BodyRead(#[source] ReqwestError),
}

/// Non-fatal conditions noticed while parsing records.
///
/// These never abort the batch; they are counted and summarized at the end
/// of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum Diagnostic {
    /// A row with no usable content was skipped.
    EmptyRowSkipped,
    /// A row carried more columns than the template binds.
    ExcessColumns,
}

impl Diagnostic {
    /// Human-readable label for the summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnostic::EmptyRowSkipped => "Empty rows skipped",
            Diagnostic::ExcessColumns => "Rows with excess columns",
        }
    }
}

/// Thread-safe diagnostic counters.
///
/// Tracks the count of each diagnostic using atomic counters. All variants
/// are initialized to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across tasks using `Arc`.
pub struct DiagnosticStats {
    counts: HashMap<Diagnostic, AtomicUsize>,
}

impl DiagnosticStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for diagnostic in Diagnostic::iter() {
            counts.insert(diagnostic, AtomicUsize::new(0));
        }
        DiagnosticStats { counts }
    }

    /// Increments the counter for one diagnostic.
    pub fn increment(&self, diagnostic: Diagnostic) {
        // All Diagnostic variants are initialized in new(), so unwrap() is safe
        self.counts
            .get(&diagnostic)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the count recorded for one diagnostic.
    pub fn get_count(&self, diagnostic: Diagnostic) -> usize {
        // All Diagnostic variants are initialized in new(), so unwrap() is safe
        self.counts.get(&diagnostic).unwrap().load(Ordering::SeqCst)
    }

    /// Returns the total across all diagnostics.
    pub fn total(&self) -> usize {
        Diagnostic::iter().map(|d| self.get_count(d)).sum()
    }

    /// Logs a per-diagnostic summary, skipping counters still at zero.
    pub fn log_summary(&self) {
        let total = self.total();
        if total == 0 {
            return;
        }

        info!("Parse diagnostics ({} total):", total);
        for diagnostic in Diagnostic::iter() {
            let count = self.get_count(diagnostic);
            if count > 0 {
                info!("   {}: {}", diagnostic.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_stats_initialization() {
        let stats = DiagnosticStats::new();
        // All diagnostics should be initialized to 0
        for diagnostic in Diagnostic::iter() {
            assert_eq!(stats.get_count(diagnostic), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_diagnostic_stats_increment() {
        let stats = DiagnosticStats::new();
        stats.increment(Diagnostic::EmptyRowSkipped);
        assert_eq!(stats.get_count(Diagnostic::EmptyRowSkipped), 1);
        assert_eq!(stats.get_count(Diagnostic::ExcessColumns), 0);
    }

    #[test]
    fn test_diagnostic_stats_multiple_increments() {
        let stats = DiagnosticStats::new();
        stats.increment(Diagnostic::ExcessColumns);
        stats.increment(Diagnostic::ExcessColumns);
        stats.increment(Diagnostic::EmptyRowSkipped);
        assert_eq!(stats.get_count(Diagnostic::ExcessColumns), 2);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_mapping_error_message() {
        let error = MappingError::NotEnoughColumns {
            required: 3,
            actual: 1,
        };
        assert_eq!(
            error.to_string(),
            "not enough columns in the record: need 3, row has 1"
        );
    }

    #[test]
    fn test_dispatch_error_messages() {
        let error = DispatchError::InvalidMethod("GE T".to_string());
        assert_eq!(error.to_string(), "Invalid HTTP method \"GE T\"");
    }
}
