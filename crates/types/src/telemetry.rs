//! Telemetry addressing types.

use serde::{Deserialize, Serialize};

/// Attribute scope an attribute key is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeScope {
    ClientScope,
    #[default]
    ServerScope,
    SharedScope,
}

impl AttributeScope {
    pub const ALL: [AttributeScope; 3] = [
        AttributeScope::ClientScope,
        AttributeScope::ServerScope,
        AttributeScope::SharedScope,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AttributeScope::ClientScope => "Client attributes",
            AttributeScope::ServerScope => "Server attributes",
            AttributeScope::SharedScope => "Shared attributes",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeScope::ClientScope => 0,
            AttributeScope::ServerScope => 1,
            AttributeScope::SharedScope => 2,
        }
    }
}

/// Category of a data key, used for key suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataKeyType {
    Attribute,
    Timeseries,
}

impl DataKeyType {
    /// Short label shown next to key inputs
    pub fn short_label(&self) -> &'static str {
        match self {
            DataKeyType::Attribute => "Attribute",
            DataKeyType::Timeseries => "Time series",
        }
    }
}
