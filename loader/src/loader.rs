//! Loading and validating configuration files.

use std::path::{Path, PathBuf};

use netplan_config_core::{NormalizedConfig, normalize, validate};
use serde_json::Value;
use tracing::{info, warn};

use crate::document::load_document;
use crate::error::Result;
use crate::files::{ReferencedFile, missing_files};

/// A validated configuration together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    path: PathBuf,
    document: Value,
    config: NormalizedConfig,
}

impl LoadedConfig {
    /// Path the configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The validated configuration.
    pub fn config(&self) -> &NormalizedConfig {
        &self.config
    }

    /// The document with defaults filled in, numbers and undeclared keys
    /// kept as written.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the referenced input files that do not exist.
    ///
    /// Relative paths resolve against `base_dir`, which should be the
    /// directory the planner run starts in, not the directory holding the
    /// configuration file.
    pub fn missing_files(&self, base_dir: &Path) -> Vec<ReferencedFile> {
        let missing = missing_files(&self.config, base_dir);
        for file in &missing {
            warn!(
                config = %self.path.display(),
                field = file.role.field_path(),
                path = %file.path.display(),
                "referenced file not found"
            );
        }
        missing
    }
}

/// Loads a JSON or YAML configuration file and validates it.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`](crate::LoadError::Invalid) with every
/// schema violation if the document is invalid, or the I/O, format or
/// syntax error that prevented reading it.
///
/// # Examples
///
/// ```no_run
/// use netplan_config_loader::load_config;
///
/// let loaded = load_config("runs/village/config.json").unwrap();
/// println!("algorithm: {}", loaded.config().network_algorithm);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<LoadedConfig> {
    let path = path.as_ref();
    let raw = load_document(path)?;
    let document = normalize(&raw)?;
    let config = validate(&document)?;

    info!(
        path = %path.display(),
        metric_model = %config.metric_model,
        network_algorithm = %config.network_algorithm,
        extends_existing_network = config.extends_existing_network(),
        "loaded configuration"
    );

    Ok(LoadedConfig {
        path: path.to_path_buf(),
        document,
        config,
    })
}
