//! The JSON request template.
//!
//! Describes how record columns map onto an HTTP request: endpoint, verb,
//! static headers, positional path and query bindings, the optional body
//! column, and the field delimiter of the input file.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::constants::DEFAULT_DELIMITER;
use crate::error_handling::ConfigError;

/// Request template, loaded once per run and read-only afterwards.
///
/// Columns bind positionally: `path_vars` take the leading columns,
/// `query_vars` the columns after them, and the body (when `has_body` is
/// set) the single column after those.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request starts from.
    pub api_endpoint: String,

    /// HTTP verb; empty acts as GET.
    #[serde(default)]
    pub method: String,

    /// Static headers applied to every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Names rendered as one path segment each from the leading columns.
    #[serde(default)]
    pub path_vars: Vec<String>,

    /// Names rendered as one query pair each from the following columns.
    #[serde(default)]
    pub query_vars: Vec<String>,

    /// Whether the column after the query bindings is a raw request body.
    #[serde(default)]
    pub has_body: bool,

    /// Field delimiter of the input file; only the first byte is used,
    /// empty means tab.
    #[serde(default)]
    pub csv_delimiter: String,
}

impl ApiConfig {
    /// Number of columns a record is expected to carry under this template.
    pub fn total_columns(&self) -> usize {
        self.path_vars.len() + self.query_vars.len() + usize::from(self.has_body)
    }

    /// Delimiter byte for the input reader.
    pub fn delimiter_byte(&self) -> u8 {
        self.csv_delimiter
            .as_bytes()
            .first()
            .copied()
            .unwrap_or(DEFAULT_DELIMITER)
    }
}

/// Loads and deserializes the request template at `path`.
pub fn load_api_config(path: &Path) -> Result<ApiConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    let config = serde_json::from_str(&raw)?;
    Ok(config)
}
