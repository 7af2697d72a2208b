//! Semantic kind of the value a widget edits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value kind of the widget being configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    #[default]
    String,
    Integer,
    Double,
    Boolean,
    Json,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::String,
        ValueType::Integer,
        ValueType::Double,
        ValueType::Boolean,
        ValueType::Json,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValueType::String => "String",
            ValueType::Integer => "Integer",
            ValueType::Double => "Double",
            ValueType::Boolean => "Boolean",
            ValueType::Json => "JSON",
        }
    }

    fn wire_name(&self) -> &'static str {
        match self {
            ValueType::String => "STRING",
            ValueType::Integer => "INTEGER",
            ValueType::Double => "DOUBLE",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Json => "JSON",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ValueType {
    type Err = String;

    /// Accepts the wire name in any case (e.g. "boolean", "BOOLEAN")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ValueType::ALL
            .iter()
            .copied()
            .find(|kind| kind.wire_name() == upper)
            .ok_or_else(|| {
                format!(
                    "Unknown value type '{}', expected one of: string, integer, double, boolean, json",
                    s
                )
            })
    }
}
