//! Input files a configuration points at.
//!
//! A planner run opens the demand-nodes CSV, the metric-model parameters
//! file and the existing-network file, resolving relative paths against its
//! working directory. Checking they exist from that same directory before a
//! run turns a late "file not found" into a configuration error.

use std::fmt;
use std::path::{Path, PathBuf};

use netplan_config_core::NormalizedConfig;
use serde::Serialize;

/// What a referenced file is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    DemandNodes,
    MetricModelParameters,
    ExistingNetworks,
}

impl FileRole {
    /// Dotted configuration path of the field naming this file.
    pub const fn field_path(self) -> &'static str {
        match self {
            Self::DemandNodes => "demand_nodes_file",
            Self::MetricModelParameters => "metric_model_parameters_file",
            Self::ExistingNetworks => "existing_networks.filename",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DemandNodes => "demand nodes",
            Self::MetricModelParameters => "metric model parameters",
            Self::ExistingNetworks => "existing networks",
        };
        f.write_str(label)
    }
}

/// A file path taken from a configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencedFile {
    pub role: FileRole,
    /// Path exactly as written in the configuration.
    pub path: PathBuf,
}

impl ReferencedFile {
    /// Resolves a relative path against `base_dir`; absolute paths are
    /// returned unchanged.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base_dir.join(&self.path)
        }
    }
}

/// Lists every file the configuration references, in field order.
///
/// # Examples
///
/// ```
/// use netplan_config_core::validate;
/// use netplan_config_loader::{FileRole, referenced_files};
/// use serde_json::json;
///
/// let config = validate(&json!({
///     "demand_nodes_file": "d.csv",
///     "metric_model": "mvMax5",
///     "network_algorithm": "mod_kruskal",
///     "existing_networks": { "filename": "grid.zip" },
/// }))
/// .unwrap();
///
/// let roles: Vec<FileRole> = referenced_files(&config).iter().map(|f| f.role).collect();
/// assert_eq!(roles, vec![FileRole::DemandNodes, FileRole::ExistingNetworks]);
/// ```
pub fn referenced_files(config: &NormalizedConfig) -> Vec<ReferencedFile> {
    let mut files = vec![ReferencedFile {
        role: FileRole::DemandNodes,
        path: PathBuf::from(&config.demand_nodes_file),
    }];

    if let Some(path) = &config.metric_model_parameters_file {
        files.push(ReferencedFile {
            role: FileRole::MetricModelParameters,
            path: PathBuf::from(path),
        });
    }

    if let Some(existing) = &config.existing_networks {
        files.push(ReferencedFile {
            role: FileRole::ExistingNetworks,
            path: PathBuf::from(&existing.filename),
        });
    }

    files
}

/// Returns the referenced files that do not exist, resolving relative paths
/// against `base_dir`.
pub fn missing_files(config: &NormalizedConfig, base_dir: &Path) -> Vec<ReferencedFile> {
    referenced_files(config)
        .into_iter()
        .filter(|file| !file.resolve(base_dir).exists())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_and_absolute() {
        let relative = ReferencedFile {
            role: FileRole::DemandNodes,
            path: PathBuf::from("d.csv"),
        };
        assert_eq!(
            relative.resolve(Path::new("/runs/a")),
            PathBuf::from("/runs/a/d.csv")
        );

        let absolute = ReferencedFile {
            role: FileRole::DemandNodes,
            path: std::env::temp_dir().join("d.csv"),
        };
        assert_eq!(absolute.resolve(Path::new("/runs/a")), absolute.path);
    }

    #[test]
    fn test_role_field_paths() {
        assert_eq!(FileRole::DemandNodes.field_path(), "demand_nodes_file");
        assert_eq!(
            FileRole::ExistingNetworks.field_path(),
            "existing_networks.filename"
        );
        assert_eq!(
            FileRole::MetricModelParameters.to_string(),
            "metric model parameters"
        );
    }
}
