//! Input record parsing.
//!
//! Turns the raw bytes of a delimited input file into an ordered sequence
//! of request descriptors, applying the template's column bindings row by
//! row.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;
use log::{info, warn};
use thiserror::Error;

use crate::config::{ApiConfig, UTF8_BOM};
use crate::error_handling::{Diagnostic, DiagnosticStats, MappingError, ParseError};
use crate::mapping::{body_field, path_segment, query_segment};
use crate::request::RequestDescriptor;

/// A fatal parse failure together with the descriptors built before it.
///
/// The caller decides what to do with the partial batch; the error itself
/// says why parsing stopped.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct ParseAbort {
    /// Descriptors built from the rows before the failure.
    pub built: Vec<RequestDescriptor>,
    /// Why parsing stopped.
    #[source]
    pub source: ParseError,
}

/// Returns the content without its leading UTF-8 byte-order mark.
///
/// Only the exact 3-byte mark is stripped; shorter content and lookalike
/// prefixes pass through unchanged.
pub fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// Parses input files into request descriptors using one template.
pub struct RecordParser {
    config: ApiConfig,
    stats: Arc<DiagnosticStats>,
}

impl RecordParser {
    /// Creates a parser for the given template.
    pub fn new(config: ApiConfig, stats: Arc<DiagnosticStats>) -> Self {
        RecordParser { config, stats }
    }

    /// Reads a file and parses every record in it.
    pub fn read_and_parse(&self, path: &Path) -> Result<Vec<RequestDescriptor>, ParseAbort> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) => {
                return Err(ParseAbort {
                    built: Vec::new(),
                    source: ParseError::ReadError(e),
                })
            }
        };
        self.parse(&content)
    }

    /// Parses raw bytes into request descriptors.
    ///
    /// Empty rows are skipped and rows with more columns than the template
    /// expects are processed with the extras ignored; both are counted as
    /// diagnostics. The first fatal condition, a reader error or a row that
    /// cannot be bound, stops parsing and returns the descriptors built so
    /// far alongside the error.
    pub fn parse(&self, content: &[u8]) -> Result<Vec<RequestDescriptor>, ParseAbort> {
        let content = strip_bom(content);
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte())
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let expected_columns = self.config.total_columns();
        let mut built = Vec::new();

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    return Err(ParseAbort {
                        built,
                        source: ParseError::MalformedRecord(e),
                    })
                }
            };

            // leading field whitespace is insignificant; trailing whitespace
            // stays so body columns arrive intact
            let row: Vec<String> = record
                .iter()
                .map(|field| field.trim_start().to_string())
                .collect();

            if is_empty_row(&row) {
                self.stats.increment(Diagnostic::EmptyRowSkipped);
                info!("skipping empty row");
                continue;
            }

            if row.len() > expected_columns {
                self.stats.increment(Diagnostic::ExcessColumns);
                warn!(
                    "row has {} columns but the template expects {}; extra columns ignored",
                    row.len(),
                    expected_columns
                );
            }

            match self.build_descriptor(&row) {
                Ok(descriptor) => built.push(descriptor),
                Err(source) => {
                    let index = built.len();
                    return Err(ParseAbort {
                        built,
                        source: ParseError::RequestConstruction { index, source },
                    });
                }
            }
        }

        Ok(built)
    }

    fn build_descriptor(&self, row: &[String]) -> Result<RequestDescriptor, MappingError> {
        let url = format!(
            "{}{}{}",
            self.config.api_endpoint,
            path_segment(&self.config, row)?,
            query_segment(&self.config, row)?
        );

        let mut builder = RequestDescriptor::builder()
            .method(&self.config.method)
            .url(url)
            .headers(self.config.headers.clone());
        if let Some(body) = body_field(&self.config, row)? {
            builder = builder.body(body);
        }
        Ok(builder.build())
    }
}

/// A row with nothing to bind: no fields at all, or a single field that
/// trims to nothing.
fn is_empty_row(row: &[String]) -> bool {
    row.is_empty() || (row.len() == 1 && row[0].trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn user_template() -> ApiConfig {
        ApiConfig {
            api_endpoint: "https://internal.example.com/api/users".to_string(),
            path_vars: vars(&["userId"]),
            query_vars: vars(&["status"]),
            ..Default::default()
        }
    }

    fn parse_with(config: ApiConfig, content: &[u8]) -> Result<Vec<RequestDescriptor>, ParseAbort> {
        let stats = Arc::new(DiagnosticStats::new());
        RecordParser::new(config, stats).parse(content)
    }

    #[test]
    fn test_strip_bom() {
        let cases: Vec<(&[u8], &[u8])> = vec![
            (b"\xEF\xBB\xBFhello", b"hello"),
            (b"hello", b"hello"),
            (b"\xEF\xBB\xBF", b""),
            (b"", b""),
            // a 2-byte lookalike prefix is untouched
            (b"\xEF\xBB", b"\xEF\xBB"),
            // only a leading mark is stripped
            (b"he\xEF\xBB\xBFllo", b"he\xEF\xBB\xBFllo"),
        ];

        for (input, expected) in cases {
            assert_eq!(strip_bom(input), expected);
        }
    }

    #[test]
    fn test_parse_tab_delimited_rows() {
        let descriptors = parse_with(user_template(), b"123\tactive\n456\tinactive").unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(
            descriptors[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
        assert_eq!(
            descriptors[1].url,
            "https://internal.example.com/api/users/456?status=inactive"
        );
    }

    #[test]
    fn test_parse_comma_delimited_rows() {
        let config = ApiConfig {
            csv_delimiter: ",".to_string(),
            ..user_template()
        };
        let descriptors = parse_with(config, b"123,active").unwrap();
        assert_eq!(
            descriptors[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
    }

    #[test]
    fn test_parse_strips_leading_bom() {
        let descriptors = parse_with(user_template(), b"\xEF\xBB\xBF123\tactive").unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
    }

    #[test]
    fn test_parse_handles_crlf_line_endings() {
        let descriptors = parse_with(user_template(), b"123\tactive\r\n456\tinactive\r\n").unwrap();
        assert_eq!(descriptors.len(), 2);
    }

    #[test]
    fn test_parse_trims_quoted_cells() {
        let descriptors = parse_with(user_template(), b"'123'\t\"active\"").unwrap();
        assert_eq!(
            descriptors[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
    }

    #[test]
    fn test_parse_skips_empty_rows() {
        let config = ApiConfig {
            api_endpoint: "https://internal.example.com/api/users".to_string(),
            path_vars: vars(&["userId"]),
            ..Default::default()
        };
        let stats = Arc::new(DiagnosticStats::new());
        let parser = RecordParser::new(config, Arc::clone(&stats));

        let descriptors = parser.parse(b"123\n   \n456").unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(stats.get_count(Diagnostic::EmptyRowSkipped), 1);
    }

    #[test]
    fn test_parse_counts_excess_columns_but_processes_the_row() {
        let stats = Arc::new(DiagnosticStats::new());
        let parser = RecordParser::new(user_template(), Arc::clone(&stats));

        let descriptors = parser.parse(b"123\tactive\tleftover").unwrap();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
        assert_eq!(stats.get_count(Diagnostic::ExcessColumns), 1);
    }

    #[test]
    fn test_parse_short_row_aborts_with_partial_batch() {
        let result = parse_with(user_template(), b"123\tactive\n456\n789\tactive");
        let abort = result.err().unwrap();

        assert_eq!(abort.built.len(), 1);
        assert_eq!(
            abort.built[0].url,
            "https://internal.example.com/api/users/123?status=active"
        );
        match abort.source {
            ParseError::RequestConstruction { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(
                    source,
                    MappingError::NotEnoughColumns {
                        required: 2,
                        actual: 1
                    }
                );
            }
            other => panic!("unexpected parse error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_method_defaults_to_get() {
        let descriptors = parse_with(user_template(), b"123\tactive").unwrap();
        assert_eq!(descriptors[0].method, "GET");
    }

    #[test]
    fn test_parse_applies_template_method_headers_and_body() {
        let mut headers = HashMap::new();
        headers.insert("x-api-key".to_string(), "secret".to_string());

        let config = ApiConfig {
            api_endpoint: "https://internal.example.com/api/users".to_string(),
            method: "POST".to_string(),
            headers,
            path_vars: vars(&["userId"]),
            has_body: true,
            ..Default::default()
        };
        let descriptors = parse_with(config, b"123\t{\"active\": true}").unwrap();

        assert_eq!(descriptors[0].method, "POST");
        assert_eq!(
            descriptors[0].headers.get("x-api-key"),
            Some(&"secret".to_string())
        );
        assert_eq!(descriptors[0].body, Some("{\"active\": true}".to_string()));
    }

    #[test]
    fn test_parse_empty_content() {
        let descriptors = parse_with(user_template(), b"").unwrap();
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_read_and_parse_missing_file() {
        let stats = Arc::new(DiagnosticStats::new());
        let parser = RecordParser::new(user_template(), stats);

        let abort = parser
            .read_and_parse(Path::new("/nonexistent/records.tsv"))
            .err()
            .unwrap();
        assert!(abort.built.is_empty());
        assert!(matches!(abort.source, ParseError::ReadError(_)));
    }
}
