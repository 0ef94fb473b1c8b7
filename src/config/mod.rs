//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, classification bounds, suffixes)
//! - CLI option types and parsing
//! - The JSON request template and its loader

mod constants;
mod template;
mod types;

// Re-export all constants
pub use constants::*;
pub use template::{load_api_config, ApiConfig};
pub use types::{LogFormat, LogLevel, ReplayOptions};

pub use crate::error_handling::ConfigError;
