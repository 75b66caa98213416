//! Small environment parsing helpers shared by the config sections.

use crate::error::ConfigError;

/// Read an environment variable, treating empty/whitespace values as absent.
pub fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a required environment variable.
pub fn required_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::MissingKey {
        key: key.to_string(),
    })
}

/// Read a string with a default.
pub fn parse_string_env(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Read a `u32` with a default.
pub fn parse_u32_env(key: &str, default: u32) -> Result<u32, ConfigError> {
    match optional_env(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected an unsigned integer, got '{raw}'"),
        }),
    }
}

/// Read a `u64` with a default.
pub fn parse_u64_env(key: &str, default: u64) -> Result<u64, ConfigError> {
    match optional_env(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected an unsigned integer, got '{raw}'"),
        }),
    }
}
