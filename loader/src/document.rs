//! Raw configuration documents.
//!
//! Configuration files are JSON (the format the planner has always read) or
//! YAML. Both parse into a [`serde_json::Value`] so the same validator runs
//! on either.
//!
//! # Example YAML
//!
//! ```yaml
//! demand_nodes_file: demand.csv
//! metric_model: mvMax5
//! network_algorithm: mod_boruvka
//! metric_model_parameters_file: metric_params.json
//! existing_networks:
//!   filename: grid.zip
//!   budget_value: 0
//! network_parameters:
//!   minimum_node_count: 2
//! ```

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, Result};

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from the file extension (`.json`, `.yaml`, `.yml`),
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for any other extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_loader::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path("run.json").unwrap(), DocumentFormat::Json);
    /// assert_eq!(DocumentFormat::from_path("run.YML").unwrap(), DocumentFormat::Yaml);
    /// assert!(DocumentFormat::from_path("run.toml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parses `text` into an untyped document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::JsonError`] or [`LoadError::YamlError`] on
    /// syntax errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_loader::DocumentFormat;
    ///
    /// let doc = DocumentFormat::Yaml.parse("metric_model: mvMax2\n").unwrap();
    /// assert_eq!(doc["metric_model"], "mvMax2");
    /// ```
    pub fn parse(self, text: &str) -> Result<Value> {
        let value: Value = match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(value)
    }
}

/// Reads and parses a configuration file without validating it.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for an unknown extension,
/// [`LoadError::IoError`] if the file cannot be read, or a syntax error.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, bytes = text.len(), "read configuration document");
    format.parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_and_json_parse_to_same_document() {
        let yaml = "demand_nodes_file: d.csv\nnetwork_parameters:\n  minimum_node_count: 2\n";
        let json = r#"{"demand_nodes_file": "d.csv", "network_parameters": {"minimum_node_count": 2}}"#;

        assert_eq!(
            DocumentFormat::Yaml.parse(yaml).unwrap(),
            DocumentFormat::Json.parse(json).unwrap()
        );
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            DocumentFormat::Json.parse("{"),
            Err(LoadError::JsonError(_))
        ));
        assert!(matches!(
            DocumentFormat::Yaml.parse("a: [1, 2"),
            Err(LoadError::YamlError(_))
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            DocumentFormat::from_path("config"),
            Err(LoadError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            DocumentFormat::from_path("config.toml"),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }
}
