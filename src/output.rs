//! Outcome file writing.
//!
//! Outcome lists are persisted next to the input file, under the input path
//! plus a suffix.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Derives the output path for an input file and suffix.
///
/// The suffix is appended to the complete file name, extension included:
/// `records.csv` with `.resp` gives `records.csv.resp`.
pub fn derived_path(input_path: &Path, suffix: &str) -> PathBuf {
    let mut name = input_path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Writes outcome lines to the derived output path.
///
/// Lines are newline-joined without a trailing newline. An empty list still
/// writes the file, leaving an empty artifact.
pub fn write_outcomes(input_path: &Path, lines: &[String], suffix: &str) -> io::Result<PathBuf> {
    let path = derived_path(input_path, suffix);
    fs::write(&path, lines.join("\n"))?;
    Ok(path)
}
