//! Schema model for network-plan configuration documents.
//!
//! The constraint tree is held as typed `'static` data rather than as a
//! generic JSON Schema interpreter: it covers exactly the shape the
//! configuration uses (objects, strings, numbers, enums, required sets,
//! inclusive minimums and defaults). [`config_schema`] returns the
//! process-wide model; [`ObjectSchema::to_json_schema`] renders it as the
//! draft-04 document external tooling consumes.
//!
//! # Examples
//!
//! ```
//! use netplan_config_core::*;
//!
//! let schema = config_schema();
//! assert!(schema.is_required("metric_model"));
//!
//! let field = schema.lookup("network_parameters.minimum_node_count").unwrap();
//! assert_eq!(field.json_type, JsonType::Number);
//! assert_eq!(field.minimum, Some(0.0));
//! assert_eq!(field.applied_default, Some(DefaultValue::Number(0.0)));
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{MetricModel, NetworkAlgorithm};

/// JSON-Schema draft the rendered document declares.
pub const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-04/schema#";

/// Primitive JSON type of a value, as named by JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Returns the JSON type of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_core::JsonType;
    /// use serde_json::json;
    ///
    /// assert_eq!(JsonType::of(&json!(1.5)), JsonType::Number);
    /// assert_eq!(JsonType::of(&json!([1, 2])), JsonType::Array);
    /// ```
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns the JSON Schema type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value declared for a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    String(&'static str),
    Number(f64),
    /// An empty object whose own property defaults are then filled in.
    EmptyObject,
}

impl DefaultValue {
    /// Returns the declared default as a JSON value.
    pub fn to_value(self) -> Value {
        match self {
            Self::String(s) => Value::String(s.to_string()),
            Self::Number(n) => number_value(n),
            Self::EmptyObject => Value::Object(Map::new()),
        }
    }
}

/// Constraints on a string-typed property.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StringRule {
    /// Literal values the string must match exactly, if restricted.
    pub allowed: Option<&'static [&'static str]>,
    /// Minimum length in characters.
    pub min_length: Option<usize>,
}

impl StringRule {
    /// Any string.
    pub const ANY: Self = Self {
        allowed: None,
        min_length: None,
    };

    /// Any string of at least one character.
    pub const NON_EMPTY: Self = Self {
        allowed: None,
        min_length: Some(1),
    };

    /// One of `allowed`.
    pub const fn one_of(allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
            min_length: None,
        }
    }
}

/// Constraints on a number-typed property.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberRule {
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
}

impl NumberRule {
    /// Any number.
    pub const ANY: Self = Self { minimum: None };

    /// A number `>= minimum`.
    pub const fn at_least(minimum: f64) -> Self {
        Self {
            minimum: Some(minimum),
        }
    }
}

/// Declared type of a property together with its type-specific constraints.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String(StringRule),
    Number(NumberRule),
    Object(&'static ObjectSchema),
}

impl FieldKind {
    /// Returns the JSON type this kind accepts.
    pub const fn json_type(&self) -> JsonType {
        match self {
            Self::String(_) => JsonType::String,
            Self::Number(_) => JsonType::Number,
            Self::Object(_) => JsonType::Object,
        }
    }
}

/// A named property of an [`ObjectSchema`].
#[derive(Debug)]
pub struct Property {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub default: Option<DefaultValue>,
}

/// Object-level constraints: declared properties and the required set.
#[derive(Debug)]
pub struct ObjectSchema {
    /// Declared properties, in document order.
    pub properties: &'static [Property],
    /// Keys the caller must supply at this level.
    pub required: &'static [&'static str],
}

/// Summary of the constraints on one field path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInfo {
    /// Dotted path from the document root.
    pub path: String,
    pub description: &'static str,
    pub json_type: JsonType,
    /// Whether the key is required within its parent object.
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Default declared by the schema.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_default")]
    pub declared_default: Option<DefaultValue>,
    /// Default the normalizer inserts when the key is absent. `None` for
    /// required keys even when a default is declared.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_default")]
    pub applied_default: Option<DefaultValue>,
}

fn serialize_default<S: serde::Serializer>(
    default: &Option<DefaultValue>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    default.map(DefaultValue::to_value).serialize(serializer)
}

impl ObjectSchema {
    /// Returns the declared property called `name`.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns `true` if `name` must be present at this level.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| *r == name)
    }

    /// Returns the default the normalizer applies for `property` when absent.
    ///
    /// Required properties never receive a default: a declared default on a
    /// required key is advisory only.
    pub fn applied_default(&self, property: &Property) -> Option<DefaultValue> {
        if self.is_required(property.name) {
            None
        } else {
            property.default
        }
    }

    /// Looks up the constraints on a dotted field path.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_core::*;
    ///
    /// let schema = config_schema();
    ///
    /// let algorithm = schema.lookup("network_algorithm").unwrap();
    /// assert!(algorithm.required);
    /// assert_eq!(algorithm.declared_default, Some(DefaultValue::String("mod_boruvka")));
    /// assert_eq!(algorithm.applied_default, None);
    ///
    /// assert!(schema.lookup("existing_networks.filename").unwrap().required);
    /// assert!(schema.lookup("existing_networks.nope").is_none());
    /// ```
    pub fn lookup(&self, path: &str) -> Option<FieldInfo> {
        let mut object = self;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let property = object.property(segment)?;
            if segments.peek().is_none() {
                return Some(object.field_info(path.to_string(), property));
            }
            match property.kind {
                FieldKind::Object(nested) => object = nested,
                _ => return None,
            }
        }

        None
    }

    /// Returns every declared field path, depth-first in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_core::config_schema;
    ///
    /// let paths = config_schema().field_paths();
    /// assert!(paths.contains(&"existing_networks.budget_value".to_string()));
    /// ```
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_paths("", &mut paths);
        paths
    }

    fn collect_paths(&self, prefix: &str, paths: &mut Vec<String>) {
        for property in self.properties {
            let path = join_path(prefix, property.name);
            if let FieldKind::Object(nested) = property.kind {
                paths.push(path.clone());
                nested.collect_paths(&path, paths);
            } else {
                paths.push(path);
            }
        }
    }

    fn field_info(&self, path: String, property: &Property) -> FieldInfo {
        let (allowed, min_length, minimum) = match property.kind {
            FieldKind::String(rule) => (rule.allowed, rule.min_length, None),
            FieldKind::Number(rule) => (None, None, rule.minimum),
            FieldKind::Object(_) => (None, None, None),
        };

        FieldInfo {
            path,
            description: property.description,
            json_type: property.kind.json_type(),
            required: self.is_required(property.name),
            allowed,
            minimum,
            min_length,
            declared_default: property.default,
            applied_default: self.applied_default(property),
        }
    }

    /// Renders the model as a draft-04 JSON Schema document.
    ///
    /// # Examples
    ///
    /// ```
    /// use netplan_config_core::config_schema;
    ///
    /// let doc = config_schema().to_json_schema();
    /// assert_eq!(doc["type"], "object");
    /// assert_eq!(doc["properties"]["network_algorithm"]["default"], "mod_boruvka");
    /// ```
    pub fn to_json_schema(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("$schema".into(), Value::String(JSON_SCHEMA_DRAFT.into()));
        doc.insert("title".into(), Value::String(SCHEMA_TITLE.into()));
        doc.extend(self.object_body());
        Value::Object(doc)
    }

    fn object_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("type".into(), json!(JsonType::Object.as_str()));

        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.to_string(), property_schema(p)))
            .collect();
        body.insert("properties".into(), Value::Object(properties));

        if !self.required.is_empty() {
            body.insert("required".into(), json!(self.required));
        }
        body
    }
}

fn property_schema(property: &Property) -> Value {
    let mut schema = match property.kind {
        FieldKind::Object(nested) => nested.object_body(),
        FieldKind::String(rule) => {
            let mut schema = Map::new();
            schema.insert("type".into(), json!(JsonType::String.as_str()));
            if let Some(allowed) = rule.allowed {
                schema.insert("enum".into(), json!(allowed));
            }
            if let Some(min_length) = rule.min_length {
                schema.insert("minLength".into(), json!(min_length));
            }
            schema
        }
        FieldKind::Number(rule) => {
            let mut schema = Map::new();
            schema.insert("type".into(), json!(JsonType::Number.as_str()));
            if let Some(minimum) = rule.minimum {
                schema.insert("minimum".into(), number_value(minimum));
            }
            schema
        }
    };

    schema.insert("description".into(), json!(property.description));
    if let Some(default) = property.default {
        schema.insert("default".into(), default.to_value());
    }
    Value::Object(schema)
}

/// Writes whole numbers as JSON integers so a filled-in `0` compares equal
/// to a supplied `0`.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        Value::from(n as i64)
    } else {
        json!(n)
    }
}

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

const SCHEMA_TITLE: &str = "Network planner configuration";

static EXISTING_NETWORKS: ObjectSchema = ObjectSchema {
    properties: &[
        Property {
            name: "filename",
            description: "Shapefile or archive holding the existing network",
            kind: FieldKind::String(StringRule::ANY),
            default: None,
        },
        Property {
            name: "budget_value",
            description: "Budget assigned to nodes of the existing network",
            kind: FieldKind::Number(NumberRule::ANY),
            default: Some(DefaultValue::Number(0.0)),
        },
    ],
    required: &["filename"],
};

static NETWORK_PARAMETERS: ObjectSchema = ObjectSchema {
    properties: &[Property {
        name: "minimum_node_count",
        description: "Drop sub-networks with fewer nodes than this",
        kind: FieldKind::Number(NumberRule::at_least(0.0)),
        default: Some(DefaultValue::Number(0.0)),
    }],
    required: &[],
};

static CONFIG_SCHEMA: ObjectSchema = ObjectSchema {
    properties: &[
        Property {
            name: "demand_nodes_file",
            description: "CSV file of demand nodes and their metric inputs",
            kind: FieldKind::String(StringRule::NON_EMPTY),
            default: None,
        },
        Property {
            name: "metric_model",
            description: "Metric model used to compute node budgets",
            kind: FieldKind::String(StringRule::one_of(MetricModel::NAMES)),
            default: None,
        },
        Property {
            name: "metric_model_parameters_file",
            description: "JSON file of metric model parameters",
            kind: FieldKind::String(StringRule::ANY),
            default: None,
        },
        Property {
            name: "network_algorithm",
            description: "Minimum spanning forest algorithm",
            kind: FieldKind::String(StringRule::one_of(NetworkAlgorithm::NAMES)),
            default: Some(DefaultValue::String(NetworkAlgorithm::ModBoruvka.as_str())),
        },
        Property {
            name: "network_parameters",
            description: "Parameters applied to the constructed network",
            kind: FieldKind::Object(&NETWORK_PARAMETERS),
            default: Some(DefaultValue::EmptyObject),
        },
        Property {
            name: "existing_networks",
            description: "Existing network that new construction extends",
            kind: FieldKind::Object(&EXISTING_NETWORKS),
            default: None,
        },
    ],
    required: &["demand_nodes_file", "metric_model", "network_algorithm"],
};

/// Returns the process-wide configuration schema model.
pub fn config_schema() -> &'static ObjectSchema {
    &CONFIG_SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_keys_are_declared_properties() {
        fn check(object: &ObjectSchema) {
            for name in object.required {
                assert!(object.property(name).is_some(), "undeclared required key {name}");
            }
            for property in object.properties {
                if let FieldKind::Object(nested) = property.kind {
                    check(nested);
                }
            }
        }
        check(config_schema());
    }

    #[test]
    fn test_lookup_reports_enum_and_type() {
        let field = config_schema().lookup("metric_model").unwrap();
        assert_eq!(field.json_type, JsonType::String);
        assert_eq!(
            field.allowed,
            Some(&["mvMax2", "mvMax3", "mvMax4", "mvMax5"][..])
        );
        assert!(field.required);
        assert_eq!(field.declared_default, None);
    }

    #[test]
    fn test_lookup_budget_value_has_no_minimum() {
        let field = config_schema()
            .lookup("existing_networks.budget_value")
            .unwrap();
        assert_eq!(field.minimum, None);
        assert!(!field.required);
        assert_eq!(field.applied_default, Some(DefaultValue::Number(0.0)));
    }

    #[test]
    fn test_lookup_rejects_paths_through_scalars() {
        assert!(config_schema().lookup("metric_model.inner").is_none());
        assert!(config_schema().lookup("").is_none());
    }

    #[test]
    fn test_required_default_is_advisory() {
        let schema = config_schema();
        let property = schema.property("network_algorithm").unwrap();
        assert!(property.default.is_some());
        assert_eq!(schema.applied_default(property), None);
    }

    #[test]
    fn test_field_paths_depth_first() {
        assert_eq!(
            config_schema().field_paths(),
            vec![
                "demand_nodes_file",
                "metric_model",
                "metric_model_parameters_file",
                "network_algorithm",
                "network_parameters",
                "network_parameters.minimum_node_count",
                "existing_networks",
                "existing_networks.filename",
                "existing_networks.budget_value",
            ]
        );
    }

    #[test]
    fn test_json_schema_document() {
        let doc = config_schema().to_json_schema();
        assert_eq!(doc["$schema"], JSON_SCHEMA_DRAFT);
        assert_eq!(
            doc["required"],
            json!(["demand_nodes_file", "metric_model", "network_algorithm"])
        );
        assert_eq!(
            doc["properties"]["metric_model"]["enum"],
            json!(["mvMax2", "mvMax3", "mvMax4", "mvMax5"])
        );
        assert_eq!(
            doc["properties"]["network_parameters"]["properties"]["minimum_node_count"]
                ["minimum"],
            json!(0)
        );
        assert_eq!(
            doc["properties"]["existing_networks"]["required"],
            json!(["filename"])
        );
        assert!(
            doc["properties"]["network_parameters"]
                .get("required")
                .is_none()
        );
        assert_eq!(doc["properties"]["network_parameters"]["default"], json!({}));
    }

    #[test]
    fn test_whole_number_defaults_render_as_integers() {
        assert_eq!(DefaultValue::Number(0.0).to_value(), json!(0));
        assert_eq!(DefaultValue::Number(-3.0).to_value(), json!(-3));
        assert_eq!(DefaultValue::Number(2.5).to_value(), json!(2.5));
        assert!(DefaultValue::Number(0.0).to_value().is_i64());
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(JsonType::of(&Value::Null).to_string(), "null");
        assert_eq!(JsonType::of(&json!(true)).to_string(), "boolean");
        assert_eq!(JsonType::of(&json!({})).to_string(), "object");
    }
}
