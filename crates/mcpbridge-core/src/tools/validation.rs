//! Validate decoded tool arguments against the advertised JSON Schema

use serde_json::Value;

use crate::types::{ToolArguments, ToolValue};

/// Validate tool arguments against a JSON Schema
///
/// Top-level only: required field presence and the declared primitive type
/// of each known property. Returns the first violation found. The tool
/// server stays the final validator.
pub fn validate_arguments(args: &ToolArguments, schema: &Value) -> Result<(), String> {
    if let Some(schema_type) = schema.get("type").and_then(|v| v.as_str()) {
        if schema_type != "object" {
            return Err(format!(
                "tool schema must describe an object, found '{}'",
                schema_type
            ));
        }
    }

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !args.contains_key(field) {
                return Err(format!("missing required field '{}'", field));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
        for (key, value) in args {
            let Some(prop_schema) = properties.get(key) else {
                continue;
            };
            if !value_matches_schema(value, prop_schema) {
                return Err(format!(
                    "field '{}' expected type '{}', got {}",
                    key,
                    describe_expected(prop_schema),
                    value.type_name()
                ));
            }
        }
    }

    Ok(())
}

fn value_matches_schema(value: &ToolValue, prop_schema: &Value) -> bool {
    match prop_schema.get("type") {
        Some(Value::String(expected)) => value_matches_type(value, expected),
        // "type": ["integer", "null"]
        Some(Value::Array(options)) => options
            .iter()
            .filter_map(|o| o.as_str())
            .any(|expected| value_matches_type(value, expected)),
        _ => true,
    }
}

fn value_matches_type(value: &ToolValue, expected: &str) -> bool {
    match expected {
        "string" => matches!(value, ToolValue::String(_)),
        "number" => matches!(
            value,
            ToolValue::Integer(_) | ToolValue::UInteger(_) | ToolValue::Float(_)
        ),
        "integer" => match value {
            ToolValue::Integer(_) | ToolValue::UInteger(_) => true,
            ToolValue::Float(f) => f.fract() == 0.0,
            _ => false,
        },
        "boolean" => matches!(value, ToolValue::Bool(_)),
        "object" => matches!(value, ToolValue::Map(_)),
        "array" => matches!(value, ToolValue::List(_)),
        "null" => matches!(value, ToolValue::Null),
        _ => true,
    }
}

fn describe_expected(prop_schema: &Value) -> String {
    match prop_schema.get("type") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(options)) => options
            .iter()
            .filter_map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
        _ => "any".to_string(),
    }
}
