//! Get-value settings record.
//!
//! Settings arrive from dashboards that may have been saved by older
//! versions, so every sub-record and every leaf tolerates absence. A
//! missing or `null` sub-record deserializes as an empty one.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{DataToValueType, GetValueAction};
use crate::telemetry::AttributeScope;

/// `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Milliseconds stored as any JSON number with no fractional part
fn whole_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ms) if ms.is_finite() && ms.fract() == 0.0 => Ok(Some(ms as i64)),
        Some(ms) => Err(de::Error::custom(format!(
            "expected whole milliseconds, got {}",
            ms
        ))),
    }
}

/// RPC call settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteRpcSettings {
    pub method: Option<String>,
    /// Timeout in milliseconds
    #[serde(deserialize_with = "whole_millis")]
    pub request_timeout: Option<i64>,
    /// Persist the request until the device comes online
    pub request_persistent: Option<bool>,
    /// Polling interval in milliseconds while waiting for a persistent response
    #[serde(deserialize_with = "whole_millis")]
    pub persistent_polling_interval: Option<i64>,
}

/// Attribute read settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetAttributeSettings {
    pub scope: Option<AttributeScope>,
    pub key: Option<String>,
    pub subscribe_for_updates: Option<bool>,
}

/// Time-series read settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTimeSeriesSettings {
    pub key: Option<String>,
    pub subscribe_for_updates: Option<bool>,
}

/// Post-processing of fetched data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataToValueSettings {
    #[serde(rename = "type")]
    pub data_type: Option<DataToValueType>,
    /// Body of `function(data)` returning the widget value
    pub data_to_value_function: Option<String>,
    /// Value the data is compared to when the widget value is boolean
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_to_value: Option<Value>,
}

/// Complete get-value configuration of a widget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetValueSettings {
    pub action: Option<GetValueAction>,
    pub default_value: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub execute_rpc: ExecuteRpcSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub get_attribute: GetAttributeSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub get_time_series: GetTimeSeriesSettings,
    #[serde(deserialize_with = "null_as_default")]
    pub data_to_value: DataToValueSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_settings_deserialization() {
        let settings: GetValueSettings = serde_json::from_value(json!({
            "action": "GET_ATTRIBUTE",
            "getAttribute": { "scope": "SERVER_SCOPE", "key": "temp" },
            "dataToValue": { "type": "NONE" }
        }))
        .unwrap();

        assert_eq!(settings.action, Some(GetValueAction::GetAttribute));
        assert_eq!(settings.get_attribute.scope, Some(AttributeScope::ServerScope));
        assert_eq!(settings.get_attribute.key.as_deref(), Some("temp"));
        assert_eq!(settings.get_attribute.subscribe_for_updates, None);
        assert_eq!(settings.data_to_value.data_type, Some(DataToValueType::None));
        assert_eq!(settings.execute_rpc, ExecuteRpcSettings::default());
    }

    #[test]
    fn test_null_sub_records_are_empty() {
        let settings: GetValueSettings = serde_json::from_value(json!({
            "action": "GET_ATTRIBUTE",
            "executeRpc": null,
            "getAttribute": { "scope": "SERVER_SCOPE", "key": "temp" },
            "getTimeSeries": null,
            "dataToValue": { "type": "NONE", "dataToValueFunction": null }
        }))
        .unwrap();

        assert_eq!(settings.execute_rpc, ExecuteRpcSettings::default());
        assert_eq!(settings.get_time_series, GetTimeSeriesSettings::default());
        assert_eq!(settings.get_attribute.key.as_deref(), Some("temp"));
        assert_eq!(settings.data_to_value.data_to_value_function, None);
    }

    #[test]
    fn test_millis_accept_whole_floats() {
        let rpc: ExecuteRpcSettings = serde_json::from_value(json!({
            "method": "getState",
            "requestTimeout": 5000.0,
            "persistentPollingInterval": 1000
        }))
        .unwrap();
        assert_eq!(rpc.request_timeout, Some(5000));
        assert_eq!(rpc.persistent_polling_interval, Some(1000));

        let fractional = serde_json::from_value::<ExecuteRpcSettings>(json!({
            "requestTimeout": 5000.5
        }));
        assert!(fractional.is_err());
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings: GetValueSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GetValueSettings::default());
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::ExecuteRpc),
            execute_rpc: ExecuteRpcSettings {
                method: Some("getState".to_string()),
                request_timeout: Some(5000),
                request_persistent: Some(true),
                persistent_polling_interval: Some(1000),
            },
            ..Default::default()
        };

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["action"], "EXECUTE_RPC");
        assert_eq!(value["executeRpc"]["requestTimeout"], 5000);
        assert_eq!(value["executeRpc"]["persistentPollingInterval"], 1000);
        assert!(value["dataToValue"].get("compareToValue").is_none());
    }
}
