//! Error types for the errmark engine
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for propagation at the binary boundary. Note that
//! the parse pipeline itself never surfaces these: an invalid pattern
//! degrades to an empty batch and malformed matches degrade field by field,
//! so the variants here cover configuration loading and CLI I/O.

use crate::pattern::PatternError;
use thiserror::Error;

/// Main error type for errmark operations
#[derive(Error, Debug)]
pub enum ErrmarkError {
    /// Extraction pattern failed validation
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] PatternError),

    /// Configuration file could not be loaded or understood
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration deserialization error
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for errmark operations
pub type Result<T> = std::result::Result<T, ErrmarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ErrmarkError::Config("missing rule list".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing rule list");
    }

    #[test]
    fn test_pattern_error_conversion() {
        let pattern_err = crate::pattern::ErrorPattern::compile("(a)").unwrap_err();
        let err: ErrmarkError = pattern_err.into();
        assert!(matches!(err, ErrmarkError::Pattern(_)));
        assert!(err.to_string().contains("Invalid extraction pattern"));
    }
}
