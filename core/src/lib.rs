//! Configuration contract for the network planner.
//!
//! This crate validates and normalizes the configuration that drives a
//! network-design run: which demand nodes to connect, which metric model
//! computes their budgets, which minimum-spanning-forest algorithm lays out
//! the network, and optionally which existing network to extend.
//!
//! - [`config_schema`] — the static schema model ([`ObjectSchema`]), queryable
//!   per field path and renderable as a draft-04 JSON Schema document.
//! - [`validate`] — checks a raw [`serde_json::Value`] against the model,
//!   collecting every [`ValidationError`], and returns a typed
//!   [`NormalizedConfig`] with defaults applied.
//! - [`normalize`] — the same checks, returning the defaulted JSON document.
//!
//! Parsing files and running the network algorithms are left to callers.
//!
//! # Example
//!
//! ```
//! use netplan_config_core::*;
//! use serde_json::json;
//!
//! let raw = json!({
//!     "demand_nodes_file": "d.csv",
//!     "metric_model": "mvMax5",
//!     "network_algorithm": "mod_kruskal",
//! });
//!
//! let config = validate(&raw).unwrap();
//! assert_eq!(config.network_parameters.minimum_node_count, 0.0);
//! assert!(config.existing_networks.is_none());
//!
//! let errors = validate(&json!({ "metric_model": "mvMax9" })).unwrap_err();
//! assert_eq!(errors.len(), 3);
//! ```

mod error;
mod schema;
mod types;
mod validate;

pub use error::{ValidationError, ValidationErrors};
pub use schema::{
    DefaultValue, FieldInfo, FieldKind, JSON_SCHEMA_DRAFT, JsonType, NumberRule, ObjectSchema,
    Property, StringRule, config_schema,
};
pub use types::*;
pub use validate::{normalize, validate};
