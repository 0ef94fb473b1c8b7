//! Configuration constants.
//!
//! Defaults and fixed values used across the application: run-parameter
//! defaults, HTTP classification bounds, and output file naming.

/// Default path of the JSON request template.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Default delay between requests in milliseconds.
pub const DEFAULT_SLEEP_MS: u64 = 1;

/// Default per-request timeout in seconds.
///
/// Applies to the real HTTP client only; dry runs never touch the network.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Field delimiter used when the template does not provide one.
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Inclusive lower bound of the status range counted as a success.
pub const HTTP_SUCCESS_MIN: u16 = 200;

/// Exclusive upper bound of the status range counted as a success.
pub const HTTP_SUCCESS_MAX: u16 = 300;

/// Suffix appended to the input path for the success output file.
pub const RESPONSE_FILE_SUFFIX: &str = ".resp";

/// Suffix appended to the input path for the failure output file.
pub const ERROR_FILE_SUFFIX: &str = ".err";

/// UTF-8 byte-order mark stripped from the start of input files.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
