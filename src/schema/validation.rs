//! Generic argument validation.
//!
//! [`ArgumentSchema::validate`] is the single routine that checks raw tool
//! arguments against a descriptor. On success it yields [`Arguments`], an
//! immutable object containing only the declared fields, which handlers
//! decode into their own typed structs with [`Arguments::parse`].

use super::types::{ArgSpec, ArgType, ArgumentSchema};
use crate::error::{ValidationError, ValidationResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Arguments that passed schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Decode into a handler-specific argument type.
    pub fn parse<T: DeserializeOwned>(self) -> ValidationResult<T> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| ValidationError::Decode {
            message: e.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl ArgumentSchema {
    /// Validate raw arguments.
    ///
    /// A missing or `null` argument object is treated as `{}`. Undeclared
    /// fields are dropped; `null` values count as absent.
    pub fn validate(&self, raw: &Value) -> ValidationResult<Arguments> {
        let empty = Map::new();
        let obj = match raw {
            Value::Null => &empty,
            Value::Object(obj) => obj,
            other => {
                return Err(ValidationError::NotAnObject {
                    actual: value_type(other).to_string(),
                });
            }
        };
        validate_fields(&self.fields, obj, "").map(Arguments)
    }
}

fn validate_fields(
    fields: &[ArgSpec],
    obj: &Map<String, Value>,
    prefix: &str,
) -> ValidationResult<Map<String, Value>> {
    let mut validated = Map::new();

    for field in fields {
        let path = join_path(prefix, field.name);
        match obj.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(ValidationError::missing_required(path));
                }
            }
            Some(value) => {
                let value = validate_value(&field.arg_type, value, &path)?;
                validated.insert(field.name.to_string(), value);
            }
        }
    }

    Ok(validated)
}

fn validate_value(arg_type: &ArgType, value: &Value, path: &str) -> ValidationResult<Value> {
    match arg_type {
        ArgType::String { non_empty } => {
            let s = value
                .as_str()
                .ok_or_else(|| ValidationError::invalid_type(path, "string", value_type(value)))?;
            if *non_empty && s.trim().is_empty() {
                return Err(ValidationError::EmptyString {
                    path: path.to_string(),
                });
            }
            Ok(value.clone())
        }
        ArgType::Enum(allowed) => {
            let s = value
                .as_str()
                .ok_or_else(|| ValidationError::invalid_type(path, "string", value_type(value)))?;
            if !allowed.contains(&s) {
                return Err(ValidationError::InvalidEnumValue {
                    path: path.to_string(),
                    value: s.to_string(),
                    allowed: allowed.iter().map(|a| a.to_string()).collect(),
                });
            }
            Ok(value.clone())
        }
        ArgType::Integer { min } => {
            let n = value
                .as_i64()
                .ok_or_else(|| ValidationError::invalid_type(path, "integer", value_type(value)))?;
            if let Some(min) = min {
                if n < *min {
                    return Err(ValidationError::BelowMinimum {
                        path: path.to_string(),
                        min: *min,
                        actual: n,
                    });
                }
            }
            Ok(value.clone())
        }
        ArgType::Boolean => {
            if !value.is_boolean() {
                return Err(ValidationError::invalid_type(
                    path,
                    "boolean",
                    value_type(value),
                ));
            }
            Ok(value.clone())
        }
        ArgType::Object => {
            if !value.is_object() {
                return Err(ValidationError::invalid_type(path, "object", value_type(value)));
            }
            Ok(value.clone())
        }
        ArgType::Record(fields) => {
            let obj = value
                .as_object()
                .ok_or_else(|| ValidationError::invalid_type(path, "object", value_type(value)))?;
            validate_fields(fields, obj, path).map(Value::Object)
        }
        ArgType::Array { items, min_items } => {
            let array = value
                .as_array()
                .ok_or_else(|| ValidationError::invalid_type(path, "array", value_type(value)))?;
            if array.len() < *min_items {
                return Err(ValidationError::TooFewItems {
                    path: path.to_string(),
                    min: *min_items,
                    actual: array.len(),
                });
            }
            array
                .iter()
                .enumerate()
                .map(|(i, item)| validate_value(items, item, &format!("{path}[{i}]")))
                .collect::<ValidationResult<Vec<_>>>()
                .map(Value::Array)
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Get the JSON type name of a value.
pub(crate) fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
