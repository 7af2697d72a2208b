//! Value acquisition strategies and post-processing types.

use serde::{Deserialize, Serialize};

/// How a widget obtains the value it displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GetValueAction {
    /// Don't fetch anything, use the configured default value
    DoNothing,
    /// Call an RPC method on the target device
    ExecuteRpc,
    /// Read an attribute of the target entity
    GetAttribute,
    /// Read the latest time-series value of the target entity
    GetTimeSeries,
}

impl GetValueAction {
    /// All actions in picker order
    pub const ALL: [GetValueAction; 4] = [
        GetValueAction::DoNothing,
        GetValueAction::ExecuteRpc,
        GetValueAction::GetAttribute,
        GetValueAction::GetTimeSeries,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GetValueAction::DoNothing => "Do nothing",
            GetValueAction::ExecuteRpc => "Execute RPC",
            GetValueAction::GetAttribute => "Get attribute",
            GetValueAction::GetTimeSeries => "Get time series",
        }
    }

    /// Position in [`GetValueAction::ALL`]
    pub fn index(&self) -> usize {
        match self {
            GetValueAction::DoNothing => 0,
            GetValueAction::ExecuteRpc => 1,
            GetValueAction::GetAttribute => 2,
            GetValueAction::GetTimeSeries => 3,
        }
    }
}

/// Conversion applied to fetched data before it becomes the widget value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataToValueType {
    /// Use the fetched data as is
    #[default]
    None,
    /// Run a user-authored function over the fetched data
    Function,
}

impl DataToValueType {
    pub const ALL: [DataToValueType; 2] = [DataToValueType::None, DataToValueType::Function];

    pub fn label(&self) -> &'static str {
        match self {
            DataToValueType::None => "None",
            DataToValueType::Function => "Function",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DataToValueType::None => 0,
            DataToValueType::Function => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names() {
        let json = serde_json::to_string(&GetValueAction::GetTimeSeries).unwrap();
        assert_eq!(json, "\"GET_TIME_SERIES\"");

        let action: GetValueAction = serde_json::from_str("\"EXECUTE_RPC\"").unwrap();
        assert_eq!(action, GetValueAction::ExecuteRpc);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, action) in GetValueAction::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        for (i, kind) in DataToValueType::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
