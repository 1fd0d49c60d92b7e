//! Argument-shape descriptors for tool inputs.
//!
//! A tool's [`ArgumentSchema`] is a closed, declarative description of every
//! argument it accepts. The same descriptor drives runtime validation (see
//! [`validation`](super::validation)) and the JSON Schema published to MCP
//! clients during tool discovery.

use serde_json::{Map, Value, json};

/// Shape of a single argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgType {
    /// A string, optionally required to be non-empty
    String { non_empty: bool },
    /// A string restricted to a fixed set of values
    Enum(&'static [&'static str]),
    /// An integer with an optional inclusive lower bound
    Integer { min: Option<i64> },
    Boolean,
    /// An arbitrary JSON object passed through to the store untouched
    Object,
    /// A nested object with its own field descriptors
    Record(Vec<ArgSpec>),
    /// An array of uniformly shaped items
    Array { items: Box<ArgType>, min_items: usize },
}

impl ArgType {
    pub fn string() -> Self {
        Self::String { non_empty: false }
    }

    pub fn non_empty_string() -> Self {
        Self::String { non_empty: true }
    }

    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String { .. } | Self::Enum(_) => "string",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
            Self::Object | Self::Record(_) => "object",
            Self::Array { .. } => "array",
        }
    }

    fn to_json_schema(&self, description: Option<&str>) -> Value {
        let mut schema = match self {
            Self::String { non_empty } => {
                let mut s = json!({"type": "string"});
                if *non_empty {
                    s["minLength"] = json!(1);
                }
                s
            }
            Self::Enum(values) => json!({"type": "string", "enum": values}),
            Self::Integer { min } => {
                let mut s = json!({"type": "integer"});
                if let Some(min) = min {
                    s["minimum"] = json!(min);
                }
                s
            }
            Self::Boolean => json!({"type": "boolean"}),
            Self::Object => json!({"type": "object", "additionalProperties": true}),
            Self::Record(fields) => object_schema(fields),
            Self::Array { items, min_items } => {
                let mut s = json!({"type": "array", "items": items.to_json_schema(None)});
                if *min_items > 0 {
                    s["minItems"] = json!(min_items);
                }
                s
            }
        };
        if let Some(description) = description {
            schema["description"] = json!(description);
        }
        schema
    }
}

/// Descriptor for one named argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub arg_type: ArgType,
    pub required: bool,
}

impl ArgSpec {
    pub fn required(name: &'static str, arg_type: ArgType, description: &'static str) -> Self {
        Self {
            name,
            description,
            arg_type,
            required: true,
        }
    }

    pub fn optional(name: &'static str, arg_type: ArgType, description: &'static str) -> Self {
        Self {
            name,
            description,
            arg_type,
            required: false,
        }
    }
}

/// The full argument schema of a tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentSchema {
    pub fields: Vec<ArgSpec>,
}

impl ArgumentSchema {
    pub fn new(fields: Vec<ArgSpec>) -> Self {
        Self { fields }
    }

    /// Schema for tools that take no arguments
    pub fn empty() -> Self {
        Self::default()
    }

    /// Render as a JSON Schema object for `tools/list`
    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.fields)
    }
}

fn object_schema(fields: &[ArgSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| {
            (
                f.name.to_string(),
                f.arg_type.to_json_schema(Some(f.description)),
            )
        })
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
