//! Closed schema descriptions for tool inputs
//!
//! Providers declare tool parameters with [`ParamSpec`] rather than
//! free-form JSON. The closed shape keeps every advertised schema an object
//! of known-kind properties; the MCP `inputSchema` is generated from it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Parameter kinds supported in tool input schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl ParamKind {
    /// JSON Schema type keyword for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::Object => "object",
        }
    }
}

/// Description of a single tool parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter kind
    pub kind: ParamKind,
    /// Human-readable description
    pub description: String,
    /// Whether the parameter must be supplied by the caller
    #[serde(default)]
    pub required: bool,
    /// Default applied when the caller omits the parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Required string parameter.
    pub fn string<S: Into<String>>(description: S) -> Self {
        Self {
            kind: ParamKind::String,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// Required object parameter.
    pub fn object<S: Into<String>>(description: S) -> Self {
        Self {
            kind: ParamKind::Object,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// Required integer parameter.
    pub fn integer<S: Into<String>>(description: S) -> Self {
        Self {
            kind: ParamKind::Integer,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// Optional integer parameter with a default.
    pub fn integer_with_default<S: Into<String>>(description: S, default: i64) -> Self {
        Self {
            kind: ParamKind::Integer,
            description: description.into(),
            required: false,
            default: Some(json!(default)),
        }
    }

    /// Mark the parameter optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Ordered map of parameter name to spec. A `BTreeMap` keeps the generated
/// schema deterministic across runs.
pub type ParamMap = BTreeMap<String, ParamSpec>;

/// Generate the MCP `inputSchema` object for a parameter map.
pub fn to_json_schema(params: &ParamMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for (name, spec) in params {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(spec.kind.json_type()));
        property.insert("description".to_string(), json!(spec.description));
        if spec.kind == ParamKind::Object {
            property.insert("additionalProperties".to_string(), json!(true));
        }
        if let Some(default) = &spec.default {
            property.insert("default".to_string(), default.clone());
        }
        properties.insert(name.clone(), Value::Object(property));

        if spec.required {
            required.push(json!(name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Fill schema defaults into a set of call arguments in place.
///
/// Only top-level properties carrying a `default` are considered; supplied
/// arguments are never overwritten.
pub fn apply_schema_defaults(schema: &Value, arguments: &mut Value) {
    let Some(properties) = schema.get("properties").and_then(|p| p.as_object()) else {
        return;
    };
    if arguments.is_null() {
        *arguments = json!({});
    }
    let Some(args) = arguments.as_object_mut() else {
        return;
    };
    for (name, property) in properties {
        if args.contains_key(name) {
            continue;
        }
        if let Some(default) = property.get("default") {
            args.insert(name.clone(), default.clone());
        }
    }
}
