//! Validation error types.
//!
//! Every violation found in a document becomes one [`ValidationError`];
//! all of them are returned together as [`ValidationErrors`].

use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use crate::JsonType;

/// A single schema violation, located by its dotted field path.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A key required at its nesting level is absent.
    #[error("{path}: missing required field")]
    MissingRequiredField { path: String },

    /// A value has the wrong JSON type. Deeper checks on it are skipped.
    #[error("{path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: JsonType,
        actual: JsonType,
    },

    /// A string is not one of the allowed literals.
    #[error("{path}: {actual:?} is not one of [{}]", .allowed.join(", "))]
    EnumViolation {
        path: String,
        allowed: Vec<String>,
        actual: String,
    },

    /// A number is below its inclusive minimum.
    #[error("{path}: {actual} is below the minimum of {minimum}")]
    BelowMinimum {
        path: String,
        minimum: f64,
        actual: f64,
    },

    /// A string is shorter than its minimum length.
    ///
    /// Length counts characters, whitespace included, so `" "` satisfies a
    /// minimum length of one.
    #[error("{path}: length {actual} is shorter than the minimum of {min_length}")]
    TooShort {
        path: String,
        min_length: usize,
        actual: usize,
    },

    /// The document root is not an object. No other checks run.
    #[error("configuration root must be an object, found {actual}")]
    InvalidRoot { actual: JsonType },

    /// A document that passed every check could not be converted into the
    /// typed configuration.
    #[error("validated configuration could not be represented: {message}")]
    Unrepresentable { message: String },
}

impl ValidationError {
    /// Returns the dotted path of the offending field, or `""` for errors
    /// that concern the whole document.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRequiredField { path }
            | Self::TypeMismatch { path, .. }
            | Self::EnumViolation { path, .. }
            | Self::BelowMinimum { path, .. }
            | Self::TooShort { path, .. } => path,
            Self::InvalidRoot { .. } | Self::Unrepresentable { .. } => "",
        }
    }
}

/// Every violation found in one document, in discovery order.
///
/// Never empty when returned from [`validate`](crate::validate).
///
/// # Examples
///
/// ```
/// use netplan_config_core::*;
/// use serde_json::json;
///
/// let errors = validate(&json!({ "metric_model": "mvMax2" })).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.paths(), vec!["demand_nodes_file", "network_algorithm"]);
/// assert!(errors.report().contains("network_algorithm: missing required field"));
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("configuration has {} validation error(s)", .errors.len())]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates over the errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the errors as a slice.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the collection, returning the errors.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Returns the field path of each error.
    pub fn paths(&self) -> Vec<&str> {
        self.errors.iter().map(ValidationError::path).collect()
    }

    /// Returns `true` if any error is located at `path`.
    pub fn contains_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path() == path)
    }

    /// Renders one line per error, each prefixed with `"  - "`.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            let _ = writeln!(out, "  - {error}");
        }
        out
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = ValidationError::EnumViolation {
            path: "metric_model".into(),
            allowed: vec!["mvMax2".into(), "mvMax3".into()],
            actual: "mvMax9".into(),
        };
        assert_eq!(
            error.to_string(),
            "metric_model: \"mvMax9\" is not one of [mvMax2, mvMax3]"
        );

        let error = ValidationError::TypeMismatch {
            path: "existing_networks".into(),
            expected: JsonType::Object,
            actual: JsonType::String,
        };
        assert_eq!(
            error.to_string(),
            "existing_networks: expected object, found string"
        );

        let error = ValidationError::BelowMinimum {
            path: "network_parameters.minimum_node_count".into(),
            minimum: 0.0,
            actual: -1.0,
        };
        assert_eq!(
            error.to_string(),
            "network_parameters.minimum_node_count: -1 is below the minimum of 0"
        );
    }

    #[test]
    fn test_root_errors_have_empty_path() {
        let error = ValidationError::InvalidRoot {
            actual: JsonType::Array,
        };
        assert_eq!(error.path(), "");
        assert_eq!(
            error.to_string(),
            "configuration root must be an object, found array"
        );
    }

    #[test]
    fn test_errors_serialize_with_kind_tag() {
        let errors = ValidationErrors::from(ValidationError::MissingRequiredField {
            path: "metric_model".into(),
        });
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "kind": "missing_required_field", "path": "metric_model" }])
        );
    }

    #[test]
    fn test_report_lists_every_error() {
        let errors = ValidationErrors::from(vec![
            ValidationError::MissingRequiredField {
                path: "demand_nodes_file".into(),
            },
            ValidationError::MissingRequiredField {
                path: "metric_model".into(),
            },
        ]);
        assert_eq!(errors.to_string(), "configuration has 2 validation error(s)");
        assert_eq!(
            errors.report(),
            "  - demand_nodes_file: missing required field\n  - metric_model: missing required field\n"
        );
        assert!(errors.contains_path("metric_model"));
        assert!(!errors.contains_path("network_algorithm"));
    }
}
