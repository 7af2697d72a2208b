//! Text to value conversion for value inputs.

use serde_json::{Number, Value};
use thiserror::Error;
use value_settings_types::ValueType;

#[derive(Debug, Error)]
pub enum ValueParseError {
    #[error("'{0}' is not a valid integer")]
    Integer(String),
    #[error("'{0}' is not a valid number")]
    Double(String),
    #[error("'{0}' is not a boolean, expected true or false")]
    Boolean(String),
    #[error("invalid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

/// Parse text typed into a value input according to the value kind.
///
/// Empty (or whitespace-only, for non-string kinds) input yields `None`.
/// String input is stored as typed.
pub fn parse_value(value_type: ValueType, input: &str) -> Result<Option<Value>, ValueParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() && (value_type != ValueType::String || input.is_empty()) {
        return Ok(None);
    }

    let value = match value_type {
        ValueType::String => Value::String(input.to_string()),
        ValueType::Integer => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| ValueParseError::Integer(trimmed.to_string()))?,
        ValueType::Double => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ValueParseError::Double(trimmed.to_string()))?,
        ValueType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => return Err(ValueParseError::Boolean(trimmed.to_string())),
        },
        ValueType::Json => {
            serde_json::from_str(trimmed).map_err(|source| ValueParseError::Json { source })?
        }
    };
    Ok(Some(value))
}

/// Parse a millisecond count; empty input yields `None`
pub fn parse_millis(input: &str) -> Result<Option<i64>, ValueParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ValueParseError::Integer(trimmed.to_string()))
}

/// Parse text where any JSON literal is accepted and anything else is a
/// string kept exactly as typed
pub fn parse_loose(input: &str) -> Option<Value> {
    if input.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(input).unwrap_or_else(|_| Value::String(input.to_string())))
}

/// Text shown in a value input for a stored value.
///
/// JSON inputs show strings quoted so they parse back as strings.
pub fn format_value(value_type: ValueType, value: &Value) -> String {
    match (value_type, value) {
        (_, Value::Null) => String::new(),
        (ValueType::Json, other) => other.to_string(),
        (_, Value::String(s)) => s.clone(),
        (_, other) => other.to_string(),
    }
}

/// Text for a [`parse_loose`] input. A string is quoted only when its
/// plain text would read back as something else.
pub fn format_loose(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if parse_loose(s).as_ref() == Some(value) => s.clone(),
        other => other.to_string(),
    }
}
