//! Field availability derivation.
//!
//! Exactly one of the four value sources (default value, RPC, attribute,
//! time series) is enabled at a time, picked by the action. The transform
//! group is enabled for every action that fetches data. Disabling a field
//! only switches off its validation; stored values are left alone.

use std::fmt;

use value_settings_types::{DataToValueType, GetValueAction};

/// Addressable controls and groups of the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Action,
    DefaultValue,
    ExecuteRpc,
    RpcMethod,
    RpcRequestTimeout,
    RpcRequestPersistent,
    RpcPersistentPollingInterval,
    GetAttribute,
    AttributeScope,
    AttributeKey,
    AttributeSubscribeForUpdates,
    GetTimeSeries,
    TimeSeriesKey,
    TimeSeriesSubscribeForUpdates,
    DataToValue,
    DataToValueType,
    DataToValueFunction,
    CompareToValue,
}

impl FieldPath {
    /// Dotted path as used in the serialized settings
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::Action => "action",
            FieldPath::DefaultValue => "defaultValue",
            FieldPath::ExecuteRpc => "executeRpc",
            FieldPath::RpcMethod => "executeRpc.method",
            FieldPath::RpcRequestTimeout => "executeRpc.requestTimeout",
            FieldPath::RpcRequestPersistent => "executeRpc.requestPersistent",
            FieldPath::RpcPersistentPollingInterval => "executeRpc.persistentPollingInterval",
            FieldPath::GetAttribute => "getAttribute",
            FieldPath::AttributeScope => "getAttribute.scope",
            FieldPath::AttributeKey => "getAttribute.key",
            FieldPath::AttributeSubscribeForUpdates => "getAttribute.subscribeForUpdates",
            FieldPath::GetTimeSeries => "getTimeSeries",
            FieldPath::TimeSeriesKey => "getTimeSeries.key",
            FieldPath::TimeSeriesSubscribeForUpdates => "getTimeSeries.subscribeForUpdates",
            FieldPath::DataToValue => "dataToValue",
            FieldPath::DataToValueType => "dataToValue.type",
            FieldPath::DataToValueFunction => "dataToValue.dataToValueFunction",
            FieldPath::CompareToValue => "dataToValue.compareToValue",
        }
    }

    /// Group a control belongs to, `None` for top-level entries
    pub fn group(&self) -> Option<FieldPath> {
        match self {
            FieldPath::RpcMethod
            | FieldPath::RpcRequestTimeout
            | FieldPath::RpcRequestPersistent
            | FieldPath::RpcPersistentPollingInterval => Some(FieldPath::ExecuteRpc),
            FieldPath::AttributeScope
            | FieldPath::AttributeKey
            | FieldPath::AttributeSubscribeForUpdates => Some(FieldPath::GetAttribute),
            FieldPath::TimeSeriesKey | FieldPath::TimeSeriesSubscribeForUpdates => {
                Some(FieldPath::GetTimeSeries)
            }
            FieldPath::DataToValueType
            | FieldPath::DataToValueFunction
            | FieldPath::CompareToValue => Some(FieldPath::DataToValue),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parts of the form are enabled for a given selection.
///
/// Child flags are already combined with their group flag, so
/// `persistent_polling_interval` is never true while `execute_rpc` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldAvailabilityPlan {
    pub default_value: bool,
    pub execute_rpc: bool,
    pub persistent_polling_interval: bool,
    pub get_attribute: bool,
    pub get_time_series: bool,
    pub data_to_value: bool,
    pub data_to_value_function: bool,
}

impl FieldAvailabilityPlan {
    pub fn is_enabled(&self, field: FieldPath) -> bool {
        match field {
            FieldPath::Action => true,
            FieldPath::DefaultValue => self.default_value,
            FieldPath::RpcPersistentPollingInterval => self.persistent_polling_interval,
            FieldPath::DataToValueFunction => self.data_to_value_function,
            FieldPath::ExecuteRpc => self.execute_rpc,
            FieldPath::GetAttribute => self.get_attribute,
            FieldPath::GetTimeSeries => self.get_time_series,
            FieldPath::DataToValue => self.data_to_value,
            other => other.group().is_some_and(|group| self.is_enabled(group)),
        }
    }

    /// The value source currently in effect, if any
    pub fn active_source(&self) -> Option<FieldPath> {
        [
            (self.default_value, FieldPath::DefaultValue),
            (self.execute_rpc, FieldPath::ExecuteRpc),
            (self.get_attribute, FieldPath::GetAttribute),
            (self.get_time_series, FieldPath::GetTimeSeries),
        ]
        .into_iter()
        .find_map(|(enabled, path)| enabled.then_some(path))
    }
}

/// Compute field availability from the three monitored selections.
///
/// An unset action leaves every value source disabled while keeping the
/// transform group enabled.
pub fn derive_field_availability(
    action: Option<GetValueAction>,
    data_to_value_type: Option<DataToValueType>,
    request_persistent: bool,
) -> FieldAvailabilityPlan {
    let mut plan = FieldAvailabilityPlan::default();

    match action {
        Some(GetValueAction::DoNothing) => plan.default_value = true,
        Some(GetValueAction::ExecuteRpc) => {
            plan.execute_rpc = true;
            plan.persistent_polling_interval = request_persistent;
        }
        Some(GetValueAction::GetAttribute) => plan.get_attribute = true,
        Some(GetValueAction::GetTimeSeries) => plan.get_time_series = true,
        None => {}
    }

    if action != Some(GetValueAction::DoNothing) {
        plan.data_to_value = true;
        plan.data_to_value_function = data_to_value_type == Some(DataToValueType::Function);
    }

    plan
}
