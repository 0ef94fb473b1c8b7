//! Column-to-request binding.
//!
//! Maps one parsed record onto the configured request template: path
//! segments from the leading columns, a query string from the columns after
//! them, and the optional trailing body column.

use log::warn;

use crate::config::ApiConfig;
use crate::error_handling::MappingError;

/// Normalizes a configured name or cell value for path and query use.
///
/// Strips surrounding whitespace, then one layer of single quotes, then one
/// layer of double quotes, then whitespace again. Each end is handled
/// independently, so an unpaired quote is removed too; interior quotes
/// survive.
pub fn trim_quotes(value: &str) -> &str {
    let value = value.trim();
    let value = value.strip_prefix('\'').unwrap_or(value);
    let value = value.strip_suffix('\'').unwrap_or(value);
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    value.trim()
}

/// Builds the path portion of the URL from the leading columns.
///
/// Each configured path variable binds positionally to one column and is
/// rendered as `/` followed by the trimmed cell value. A row missing a
/// bound column is an error; configured variables beyond the template's own
/// expected column count are reported and skipped.
pub fn path_segment(config: &ApiConfig, row: &[String]) -> Result<String, MappingError> {
    let total_columns = config.total_columns();
    let bound = config.path_vars.len().min(total_columns);

    let mut segment = String::new();
    for index in 0..bound {
        let value = row.get(index).ok_or(MappingError::NotEnoughColumns {
            required: bound,
            actual: row.len(),
        })?;
        segment.push('/');
        segment.push_str(trim_quotes(value));
    }

    if config.path_vars.len() > total_columns {
        warn!(
            "{} path variables configured but the template expects {} columns in total; extra variables ignored",
            config.path_vars.len(),
            total_columns
        );
    }

    Ok(segment)
}

/// Builds the query-string portion of the URL from the columns after the
/// path bindings.
///
/// Returns an empty string when no query variables are configured.
/// Otherwise the result is a leading `?` followed by `name=value` pairs
/// joined with `&`, both sides trimmed. A variable whose column index falls
/// outside the template's expected column count stops the query string
/// there; the pairs built so far are kept.
pub fn query_segment(config: &ApiConfig, row: &[String]) -> Result<String, MappingError> {
    if config.query_vars.is_empty() {
        return Ok(String::new());
    }

    let total_columns = config.total_columns();
    let offset = config.path_vars.len();

    let mut segment = String::from("?");
    for (position, name) in config.query_vars.iter().enumerate() {
        let column = offset + position;
        if column >= total_columns {
            warn!(
                "query variable {:?} would read column {} but the template expects {} columns; stopping",
                name, column, total_columns
            );
            break;
        }

        let value = row.get(column).ok_or(MappingError::NotEnoughColumns {
            required: column + 1,
            actual: row.len(),
        })?;

        if position > 0 {
            segment.push('&');
        }
        segment.push_str(trim_quotes(name));
        segment.push('=');
        segment.push_str(trim_quotes(value));
    }

    Ok(segment)
}

/// Extracts the trailing body column when the template has one.
///
/// The body cell passes through verbatim; the trim rule applies only to
/// path and query values.
pub fn body_field(config: &ApiConfig, row: &[String]) -> Result<Option<String>, MappingError> {
    if !config.has_body {
        return Ok(None);
    }

    let index = config.path_vars.len() + config.query_vars.len();
    match row.get(index) {
        Some(value) => Ok(Some(value.clone())),
        None => Err(MappingError::NotEnoughColumns {
            required: index + 1,
            actual: row.len(),
        }),
    }
}
