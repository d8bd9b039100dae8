//! Typed configuration produced by a successful validation.
//!
//! These types mirror the document shape described by the
//! [schema model](crate::config_schema). Keys serialize in snake_case and the
//! enum types serialize as the literal strings the schema accepts, so a
//! [`NormalizedConfig`] written back out validates again unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metric model applied to the constructed network.
///
/// Selected by the literal schema value; no case folding or aliasing is
/// performed.
///
/// # Examples
///
/// ```
/// use netplan_config_core::MetricModel;
///
/// assert_eq!(MetricModel::MvMax5.as_str(), "mvMax5");
/// assert_eq!(MetricModel::NAMES.len(), MetricModel::ALL.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricModel {
    #[serde(rename = "mvMax2")]
    MvMax2,
    #[serde(rename = "mvMax3")]
    MvMax3,
    #[serde(rename = "mvMax4")]
    MvMax4,
    #[serde(rename = "mvMax5")]
    MvMax5,
}

impl MetricModel {
    /// Every metric model, in schema order.
    pub const ALL: [MetricModel; 4] = [Self::MvMax2, Self::MvMax3, Self::MvMax4, Self::MvMax5];

    /// Literal values accepted by the schema, in the same order as [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] = &[
        Self::MvMax2.as_str(),
        Self::MvMax3.as_str(),
        Self::MvMax4.as_str(),
        Self::MvMax5.as_str(),
    ];

    /// Returns the schema literal for this model.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MvMax2 => "mvMax2",
            Self::MvMax3 => "mvMax3",
            Self::MvMax4 => "mvMax4",
            Self::MvMax5 => "mvMax5",
        }
    }
}

impl fmt::Display for MetricModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum-spanning-forest strategy used to connect demand nodes.
///
/// # Examples
///
/// ```
/// use netplan_config_core::NetworkAlgorithm;
///
/// assert_eq!(NetworkAlgorithm::default(), NetworkAlgorithm::ModBoruvka);
/// assert_eq!(NetworkAlgorithm::ModKruskal.to_string(), "mod_kruskal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkAlgorithm {
    /// Modified Boruvka (the schema's advisory default).
    #[default]
    ModBoruvka,
    /// Modified Kruskal.
    ModKruskal,
}

impl NetworkAlgorithm {
    /// Every algorithm, in schema order.
    pub const ALL: [NetworkAlgorithm; 2] = [Self::ModBoruvka, Self::ModKruskal];

    /// Literal values accepted by the schema, in the same order as [`ALL`](Self::ALL).
    pub const NAMES: &'static [&'static str] =
        &[Self::ModBoruvka.as_str(), Self::ModKruskal.as_str()];

    /// Returns the schema literal for this algorithm.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModBoruvka => "mod_boruvka",
            Self::ModKruskal => "mod_kruskal",
        }
    }
}

impl fmt::Display for NetworkAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-built network that new construction may extend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingNetworksConfig {
    /// Path of the file holding the existing network geometry.
    pub filename: String,
    /// Initial budget value assigned to the existing network.
    pub budget_value: f64,
}

/// Parameters applied after the network algorithm runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkParametersConfig {
    /// Sub-networks with fewer nodes than this are dropped. Inclusive, `>= 0`.
    pub minimum_node_count: f64,
}

impl Default for NetworkParametersConfig {
    fn default() -> Self {
        Self {
            minimum_node_count: 0.0,
        }
    }
}

/// Fully validated and defaulted configuration.
///
/// Only [`validate`](crate::validate) produces values of this type from raw
/// input; a value either passed every schema constraint or was never built.
/// It holds no reference to the schema model.
///
/// # Examples
///
/// ```
/// use netplan_config_core::*;
/// use serde_json::json;
///
/// let config = validate(&json!({
///     "demand_nodes_file": "d.csv",
///     "metric_model": "mvMax5",
///     "network_algorithm": "mod_kruskal",
/// }))
/// .unwrap();
///
/// assert_eq!(config.metric_model, MetricModel::MvMax5);
/// assert_eq!(config.network_algorithm, NetworkAlgorithm::ModKruskal);
/// assert_eq!(config.network_parameters.minimum_node_count, 0.0);
/// assert!(config.existing_networks.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedConfig {
    /// CSV file listing the demand nodes.
    pub demand_nodes_file: String,
    /// Metric model to run against the demand nodes.
    pub metric_model: MetricModel,
    /// Network construction algorithm.
    pub network_algorithm: NetworkAlgorithm,
    /// Existing network to extend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_networks: Option<ExistingNetworksConfig>,
    /// Post-construction network parameters.
    pub network_parameters: NetworkParametersConfig,
    /// JSON file with metric-model parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_model_parameters_file: Option<String>,
}

impl NormalizedConfig {
    /// Validates `raw` and builds a configuration from it.
    ///
    /// Equivalent to [`validate`](crate::validate).
    ///
    /// # Errors
    ///
    /// Returns every violation found in `raw`.
    pub fn from_value(
        raw: &serde_json::Value,
    ) -> Result<Self, crate::ValidationErrors> {
        crate::validate(raw)
    }

    /// Returns `true` if the configuration extends an existing network.
    pub fn extends_existing_network(&self) -> bool {
        self.existing_networks.is_some()
    }
}

impl TryFrom<&serde_json::Value> for NormalizedConfig {
    type Error = crate::ValidationErrors;

    fn try_from(raw: &serde_json::Value) -> Result<Self, Self::Error> {
        crate::validate(raw)
    }
}
