//! Error types for configuration loading.
//!
//! Covers every way turning a file path into a validated configuration can
//! fail: I/O, JSON or YAML syntax, unknown file formats, and schema
//! violations.

use netplan_config_core::ValidationErrors;
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON syntax error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML syntax error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// The document parsed but violates the configuration schema.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl LoadError {
    /// Returns the schema violations if this error is [`LoadError::Invalid`].
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Convenience alias for results with [`LoadError`].
pub type Result<T> = std::result::Result<T, LoadError>;
