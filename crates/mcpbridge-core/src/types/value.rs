//! Tagged values for tool arguments
//!
//! The model sends arguments as a JSON document in text form. They are
//! decoded into `ToolValue` so they can be checked against the tool's
//! schema before anything is sent to the tool server.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Decoded tool arguments, keyed by parameter name
pub type ToolArguments = BTreeMap<String, ToolValue>;

/// A structured argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ToolValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    UInteger(u64),
    Float(f64),
    String(String),
    List(Vec<ToolValue>),
    Map(BTreeMap<String, ToolValue>),
}

/// Errors decoding the wire form of tool arguments
#[derive(Error, Debug)]
pub enum ArgumentError {
    #[error("arguments are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ToolValue {
    /// JSON-schema style type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            ToolValue::Null => "null",
            ToolValue::Bool(_) => "boolean",
            ToolValue::Integer(_) | ToolValue::UInteger(_) => "integer",
            ToolValue::Float(_) => "number",
            ToolValue::String(_) => "string",
            ToolValue::List(_) => "array",
            ToolValue::Map(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ToolValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ToolValue::Integer(i) => Some(*i as f64),
            ToolValue::UInteger(u) => Some(*u as f64),
            ToolValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ToolValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Convert into a JSON value for the wire
    pub fn to_json(&self) -> Value {
        match self {
            ToolValue::Null => Value::Null,
            ToolValue::Bool(b) => Value::Bool(*b),
            ToolValue::Integer(i) => Value::Number(Number::from(*i)),
            ToolValue::UInteger(u) => Value::Number(Number::from(*u)),
            // Non-finite floats have no JSON form
            ToolValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            ToolValue::String(s) => Value::String(s.clone()),
            ToolValue::List(items) => Value::Array(items.iter().map(ToolValue::to_json).collect()),
            ToolValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for ToolValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ToolValue::Null,
            Value::Bool(b) => ToolValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ToolValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    ToolValue::UInteger(u)
                } else {
                    ToolValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ToolValue::String(s.clone()),
            Value::Array(items) => ToolValue::List(items.iter().map(ToolValue::from).collect()),
            Value::Object(entries) => ToolValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), ToolValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for ToolValue {
    fn from(value: Value) -> Self {
        ToolValue::from(&value)
    }
}

impl From<&str> for ToolValue {
    fn from(s: &str) -> Self {
        ToolValue::String(s.to_string())
    }
}

impl From<i64> for ToolValue {
    fn from(i: i64) -> Self {
        ToolValue::Integer(i)
    }
}

impl From<f64> for ToolValue {
    fn from(f: f64) -> Self {
        ToolValue::Float(f)
    }
}

impl From<bool> for ToolValue {
    fn from(b: bool) -> Self {
        ToolValue::Bool(b)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode the wire form of tool arguments
///
/// Empty input decodes to an empty map; anything other than a JSON object
/// is rejected.
pub fn parse_arguments(wire: &str) -> Result<ToolArguments, ArgumentError> {
    let trimmed = wire.trim();
    if trimmed.is_empty() {
        return Ok(ToolArguments::new());
    }

    let value: Value = serde_json::from_str(trimmed)?;
    match value {
        Value::Object(entries) => Ok(entries
            .iter()
            .map(|(k, v)| (k.clone(), ToolValue::from(v)))
            .collect()),
        other => Err(ArgumentError::NotAnObject(json_type_name(&other))),
    }
}

/// Convert decoded arguments into a JSON object for the tool server
pub fn arguments_to_json(arguments: &ToolArguments) -> Map<String, Value> {
    arguments
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

/// Encode arguments back into their wire form
pub fn encode_arguments(arguments: &ToolArguments) -> String {
    Value::Object(arguments_to_json(arguments)).to_string()
}
