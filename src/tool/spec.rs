// ABOUTME: Declarative parameter schema for tools - kinds, descriptions,
// ABOUTME: defaults, required set, validation, and JSON Schema conversion.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::ToolError;

/// The JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamKind {
    /// The JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }

    fn from_schema_type(name: &str) -> Self {
        match name {
            "integer" => ParamKind::Integer,
            "number" => ParamKind::Number,
            "boolean" => ParamKind::Boolean,
            _ => ParamKind::String,
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// Create a parameter with no default.
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            default: None,
        }
    }

    /// Attach a default value, marking the parameter optional in practice.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Declarative schema for a tool's keyword arguments.
///
/// Parameters keep declaration order; the required set must be a subset of
/// the declared names (checked when the tool is registered).
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    params: Vec<ParamSpec>,
    required: BTreeSet<String>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Mark a declared parameter as required.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Declared parameters in declaration order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// First required name that is not declared, if any.
    pub fn undeclared_required(&self) -> Option<&str> {
        self.required
            .iter()
            .find(|name| !self.params.iter().any(|p| &p.name == *name))
            .map(String::as_str)
    }

    /// Check required presence and type conformance of `args`.
    ///
    /// Undeclared arguments are ignored; the external caller may send more
    /// than the tool consumes.
    pub fn validate(&self, args: &Value) -> Result<(), ToolError> {
        let object = match args {
            Value::Object(map) => map,
            Value::Null if self.required.is_empty() => return Ok(()),
            _ => {
                return Err(ToolError::InvalidParams(
                    "arguments must be a JSON object".into(),
                ));
            }
        };

        for name in &self.required {
            if !object.contains_key(name) {
                return Err(ToolError::InvalidParams(format!(
                    "missing required parameter '{}'",
                    name
                )));
            }
        }

        for param in &self.params {
            if let Some(value) = object.get(&param.name) {
                if !param.kind.accepts(value) {
                    return Err(ToolError::InvalidParams(format!(
                        "parameter '{}' expected {}",
                        param.name,
                        param.kind.as_str()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Fill declared defaults for parameters absent from `args`.
    ///
    /// A null or non-object value is replaced by an empty object first so
    /// defaults always land somewhere.
    pub fn apply_defaults(&self, args: &mut Value) {
        if !args.is_object() {
            *args = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(object) = args {
            for param in &self.params {
                if let Some(default) = &param.default {
                    object
                        .entry(param.name.clone())
                        .or_insert_with(|| default.clone());
                }
            }
        }
    }

    /// Render the equivalent JSON Schema object for LLM tool definitions.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for param in &self.params {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), Value::String(param.kind.as_str().into()));
            if !param.description.is_empty() {
                prop.insert(
                    "description".into(),
                    Value::String(param.description.clone()),
                );
            }
            if let Some(default) = &param.default {
                prop.insert("default".into(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));
        }

        let required: Vec<Value> = self
            .params
            .iter()
            .filter(|p| self.is_required(&p.name))
            .map(|p| Value::String(p.name.clone()))
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Lossy inverse of [`to_json_schema`], used to wrap tools whose schemas
    /// arrive as raw JSON Schema (MCP servers).
    ///
    /// Required names without a matching property are dropped to preserve
    /// the subset invariant.
    pub fn from_json_schema(schema: &Value) -> Self {
        let mut spec = ToolSpec::new();

        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return spec;
        };

        for (name, prop) in properties {
            let kind = prop
                .get("type")
                .and_then(Value::as_str)
                .map(ParamKind::from_schema_type)
                .unwrap_or(ParamKind::String);
            let description = prop
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let mut param = ParamSpec::new(name.clone(), kind, description);
            if let Some(default) = prop.get("default") {
                param = param.with_default(default.clone());
            }
            spec = spec.param(param);
        }

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for name in required.iter().filter_map(Value::as_str) {
                if properties.contains_key(name) {
                    spec = spec.required(name);
                }
            }
        }

        spec
    }
}
