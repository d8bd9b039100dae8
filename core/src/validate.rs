//! Configuration validation and normalization.
//!
//! [`validate`] walks a raw document against the [schema model](crate::config_schema)
//! top-down and collects every violation instead of stopping at the first,
//! so a configuration author sees all problems in one pass. Only a document
//! that passes every check receives defaults and becomes a
//! [`NormalizedConfig`].
//!
//! # Examples
//!
//! ```
//! use netplan_config_core::*;
//! use serde_json::json;
//!
//! let config = validate(&json!({
//!     "demand_nodes_file": "d.csv",
//!     "metric_model": "mvMax3",
//!     "network_algorithm": "mod_boruvka",
//!     "existing_networks": { "filename": "grid.zip" },
//! }))
//! .unwrap();
//! assert_eq!(config.existing_networks.unwrap().budget_value, 0.0);
//!
//! // Invalid: enum value not in the allowed set, minimum violated
//! let errors = validate(&json!({
//!     "demand_nodes_file": "d.csv",
//!     "metric_model": "mvMax9",
//!     "network_algorithm": "mod_boruvka",
//!     "network_parameters": { "minimum_node_count": -1 },
//! }))
//! .unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ValidationError, ValidationErrors};
use crate::schema::{FieldKind, ObjectSchema, NumberRule, StringRule, join_path};
use crate::{JsonType, NormalizedConfig, config_schema};

/// Validates a raw configuration document and returns the normalized config.
///
/// Checks run depth-first in schema declaration order: the required set of
/// each object first, then each present property's type, enum membership,
/// length and minimum, recursing into nested objects. A value with the wrong
/// type is not checked further. Keys the schema does not declare are
/// allowed and ignored.
///
/// Defaults are applied only after the whole document passed, and only to
/// properties that are not required at their level.
///
/// # Errors
///
/// Returns every violation found. A non-object root yields a single
/// [`ValidationError::InvalidRoot`].
///
/// # Examples
///
/// ```
/// use netplan_config_core::*;
/// use serde_json::json;
///
/// // `network_algorithm` declares a default but is still required.
/// let errors = validate(&json!({
///     "demand_nodes_file": "d.csv",
///     "metric_model": "mvMax2",
/// }))
/// .unwrap_err();
/// assert_eq!(
///     errors.into_vec(),
///     vec![ValidationError::MissingRequiredField { path: "network_algorithm".into() }]
/// );
/// ```
pub fn validate(raw: &Value) -> Result<NormalizedConfig, ValidationErrors> {
    let normalized = normalize(raw)?;
    serde_json::from_value(normalized).map_err(|err| {
        ValidationErrors::from(ValidationError::Unrepresentable {
            message: err.to_string(),
        })
    })
}

/// Validates a raw document and returns it with defaults filled in.
///
/// Unlike [`validate`], keys the schema does not declare are preserved in
/// the output.
///
/// # Errors
///
/// Same as [`validate`].
///
/// # Examples
///
/// ```
/// use netplan_config_core::normalize;
/// use serde_json::json;
///
/// let doc = normalize(&json!({
///     "demand_nodes_file": "d.csv",
///     "metric_model": "mvMax2",
///     "network_algorithm": "mod_kruskal",
///     "comment": "kept",
/// }))
/// .unwrap();
/// assert_eq!(doc["network_parameters"], json!({ "minimum_node_count": 0 }));
/// assert_eq!(doc["comment"], "kept");
/// ```
pub fn normalize(raw: &Value) -> Result<Value, ValidationErrors> {
    let schema = config_schema();
    let Some(object) = raw.as_object() else {
        return Err(ValidationError::InvalidRoot {
            actual: JsonType::of(raw),
        }
        .into());
    };

    let mut errors = Vec::new();
    check_object(schema, object, "", &mut errors);
    if !errors.is_empty() {
        debug!(count = errors.len(), "configuration rejected");
        return Err(errors.into());
    }

    Ok(Value::Object(apply_defaults(schema, object)))
}

fn check_object(
    schema: &ObjectSchema,
    object: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for name in schema.required {
        if !object.contains_key(*name) {
            errors.push(ValidationError::MissingRequiredField {
                path: join_path(prefix, name),
            });
        }
    }

    for property in schema.properties {
        if let Some(value) = object.get(property.name) {
            check_value(property.kind, value, &join_path(prefix, property.name), errors);
        }
    }

    for key in object.keys() {
        if schema.property(key).is_none() {
            debug!(path = %join_path(prefix, key), "ignoring undeclared key");
        }
    }
}

fn check_value(kind: FieldKind, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    match (kind, value) {
        (FieldKind::String(rule), Value::String(s)) => check_string(rule, s, path, errors),
        (FieldKind::Number(rule), Value::Number(n)) => {
            if let Some(n) = n.as_f64() {
                check_number(rule, n, path, errors);
            }
        }
        (FieldKind::Object(nested), Value::Object(object)) => {
            check_object(nested, object, path, errors);
        }
        (kind, value) => errors.push(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected: kind.json_type(),
            actual: JsonType::of(value),
        }),
    }
}

fn check_string(rule: StringRule, s: &str, path: &str, errors: &mut Vec<ValidationError>) {
    if let Some(allowed) = rule.allowed {
        if !allowed.iter().any(|a| *a == s) {
            errors.push(ValidationError::EnumViolation {
                path: path.to_string(),
                allowed: allowed.iter().map(|a| a.to_string()).collect(),
                actual: s.to_string(),
            });
        }
    }

    if let Some(min_length) = rule.min_length {
        let length = s.chars().count();
        if length < min_length {
            errors.push(ValidationError::TooShort {
                path: path.to_string(),
                min_length,
                actual: length,
            });
        }
    }
}

fn check_number(rule: NumberRule, n: f64, path: &str, errors: &mut Vec<ValidationError>) {
    if let Some(minimum) = rule.minimum {
        if n < minimum {
            errors.push(ValidationError::BelowMinimum {
                path: path.to_string(),
                minimum,
                actual: n,
            });
        }
    }
}

/// Copies `object` and inserts the applicable default of every absent
/// property, recursing into present and defaulted nested objects.
fn apply_defaults(schema: &ObjectSchema, object: &Map<String, Value>) -> Map<String, Value> {
    let mut out = object.clone();

    for property in schema.properties {
        match out.get_mut(property.name) {
            Some(Value::Object(present)) => {
                if let FieldKind::Object(nested) = property.kind {
                    *present = apply_defaults(nested, present);
                }
            }
            Some(_) => {}
            None => {
                let Some(default) = schema.applied_default(property) else {
                    continue;
                };
                let value = match (property.kind, default.to_value()) {
                    (FieldKind::Object(nested), Value::Object(empty)) => {
                        Value::Object(apply_defaults(nested, &empty))
                    }
                    (_, value) => value,
                };
                out.insert(property.name.to_string(), value);
            }
        }
    }

    out
}
