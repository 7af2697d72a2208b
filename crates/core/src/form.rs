//! Typed settings form.
//!
//! Each control carries its value and an explicit enabled flag. The form is
//! seeded once from (possibly absent) settings, and its raw value always
//! includes disabled controls.

use serde_json::Value;
use value_settings_types::{
    AttributeScope, DataToValueSettings, DataToValueType, ExecuteRpcSettings, GetAttributeSettings,
    GetTimeSeriesSettings, GetValueAction, GetValueSettings, ValueType,
};

use crate::availability::FieldAvailabilityPlan;

/// A single form control
#[derive(Debug, Clone, PartialEq)]
pub struct Control<T> {
    value: Option<T>,
    enabled: bool,
}

impl<T> Control<T> {
    pub fn new(value: Option<T>) -> Self {
        Self {
            value,
            enabled: true,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_value(&mut self, value: Option<T>) {
        self.value = value;
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl<T: Clone> Control<T> {
    pub fn raw_value(&self) -> Option<T> {
        self.value.clone()
    }
}

/// RPC controls
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteRpcGroup {
    enabled: bool,
    pub method: Control<String>,
    pub request_timeout: Control<i64>,
    pub request_persistent: Control<bool>,
    pub persistent_polling_interval: Control<i64>,
}

impl ExecuteRpcGroup {
    fn new(settings: &ExecuteRpcSettings) -> Self {
        Self {
            enabled: true,
            method: Control::new(settings.method.clone()),
            request_timeout: Control::new(settings.request_timeout),
            request_persistent: Control::new(settings.request_persistent),
            persistent_polling_interval: Control::new(settings.persistent_polling_interval),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Group switch cascades to every child
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.method.set_enabled(enabled);
        self.request_timeout.set_enabled(enabled);
        self.request_persistent.set_enabled(enabled);
        self.persistent_polling_interval.set_enabled(enabled);
    }

    /// Unset counts as not persistent
    pub fn is_request_persistent(&self) -> bool {
        self.request_persistent.value().copied().unwrap_or(false)
    }

    fn raw_value(&self) -> ExecuteRpcSettings {
        ExecuteRpcSettings {
            method: self.method.raw_value(),
            request_timeout: self.request_timeout.raw_value(),
            request_persistent: self.request_persistent.raw_value(),
            persistent_polling_interval: self.persistent_polling_interval.raw_value(),
        }
    }
}

/// Attribute controls
#[derive(Debug, Clone, PartialEq)]
pub struct GetAttributeGroup {
    enabled: bool,
    pub scope: Control<AttributeScope>,
    pub key: Control<String>,
    pub subscribe_for_updates: Control<bool>,
}

impl GetAttributeGroup {
    fn new(settings: &GetAttributeSettings) -> Self {
        Self {
            enabled: true,
            scope: Control::new(settings.scope),
            key: Control::new(settings.key.clone()),
            subscribe_for_updates: Control::new(settings.subscribe_for_updates),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.scope.set_enabled(enabled);
        self.key.set_enabled(enabled);
        self.subscribe_for_updates.set_enabled(enabled);
    }

    fn raw_value(&self) -> GetAttributeSettings {
        GetAttributeSettings {
            scope: self.scope.raw_value(),
            key: self.key.raw_value(),
            subscribe_for_updates: self.subscribe_for_updates.raw_value(),
        }
    }
}

/// Time-series controls
#[derive(Debug, Clone, PartialEq)]
pub struct GetTimeSeriesGroup {
    enabled: bool,
    pub key: Control<String>,
    pub subscribe_for_updates: Control<bool>,
}

impl GetTimeSeriesGroup {
    fn new(settings: &GetTimeSeriesSettings) -> Self {
        Self {
            enabled: true,
            key: Control::new(settings.key.clone()),
            subscribe_for_updates: Control::new(settings.subscribe_for_updates),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.key.set_enabled(enabled);
        self.subscribe_for_updates.set_enabled(enabled);
    }

    fn raw_value(&self) -> GetTimeSeriesSettings {
        GetTimeSeriesSettings {
            key: self.key.raw_value(),
            subscribe_for_updates: self.subscribe_for_updates.raw_value(),
        }
    }
}

/// Transform controls
#[derive(Debug, Clone, PartialEq)]
pub struct DataToValueGroup {
    enabled: bool,
    pub data_type: Control<DataToValueType>,
    pub data_to_value_function: Control<String>,
    /// Only present for boolean widgets
    pub compare_to_value: Option<Control<Value>>,
}

impl DataToValueGroup {
    fn new(settings: &DataToValueSettings, value_type: ValueType) -> Self {
        let compare_to_value = (value_type == ValueType::Boolean)
            .then(|| Control::new(settings.compare_to_value.clone()));
        Self {
            enabled: true,
            data_type: Control::new(settings.data_type),
            data_to_value_function: Control::new(settings.data_to_value_function.clone()),
            compare_to_value,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.data_type.set_enabled(enabled);
        self.data_to_value_function.set_enabled(enabled);
        if let Some(compare) = self.compare_to_value.as_mut() {
            compare.set_enabled(enabled);
        }
    }

    fn raw_value(&self) -> DataToValueSettings {
        DataToValueSettings {
            data_type: self.data_type.raw_value(),
            data_to_value_function: self.data_to_value_function.raw_value(),
            compare_to_value: self
                .compare_to_value
                .as_ref()
                .and_then(|compare| compare.raw_value()),
        }
    }
}

/// The whole get-value settings form
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub action: Control<GetValueAction>,
    pub default_value: Control<Value>,
    pub execute_rpc: ExecuteRpcGroup,
    pub get_attribute: GetAttributeGroup,
    pub get_time_series: GetTimeSeriesGroup,
    pub data_to_value: DataToValueGroup,
}

impl SettingsForm {
    /// Build the form from optional initial settings.
    ///
    /// Absent settings seed every control empty. Everything starts enabled;
    /// callers apply a plan right after.
    pub fn new(settings: Option<&GetValueSettings>, value_type: ValueType) -> Self {
        let empty = GetValueSettings::default();
        let settings = settings.unwrap_or(&empty);
        Self {
            action: Control::new(settings.action),
            default_value: Control::new(settings.default_value.clone()),
            execute_rpc: ExecuteRpcGroup::new(&settings.execute_rpc),
            get_attribute: GetAttributeGroup::new(&settings.get_attribute),
            get_time_series: GetTimeSeriesGroup::new(&settings.get_time_series),
            data_to_value: DataToValueGroup::new(&settings.data_to_value, value_type),
        }
    }

    /// Assign enabled flags from a plan. Values are never touched.
    pub fn apply_plan(&mut self, plan: &FieldAvailabilityPlan) {
        self.default_value.set_enabled(plan.default_value);

        self.execute_rpc.set_enabled(plan.execute_rpc);
        self.execute_rpc
            .persistent_polling_interval
            .set_enabled(plan.persistent_polling_interval);

        self.get_attribute.set_enabled(plan.get_attribute);
        self.get_time_series.set_enabled(plan.get_time_series);

        self.data_to_value.set_enabled(plan.data_to_value);
        self.data_to_value
            .data_to_value_function
            .set_enabled(plan.data_to_value_function);
    }

    /// Values of every control, enabled or not
    pub fn raw_value(&self) -> GetValueSettings {
        GetValueSettings {
            action: self.action.raw_value(),
            default_value: self.default_value.raw_value(),
            execute_rpc: self.execute_rpc.raw_value(),
            get_attribute: self.get_attribute.raw_value(),
            get_time_series: self.get_time_series.raw_value(),
            data_to_value: self.data_to_value.raw_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::derive_field_availability;
    use serde_json::json;

    #[test]
    fn test_absent_settings_seed_empty_controls() {
        let form = SettingsForm::new(None, ValueType::String);
        assert_eq!(form.action.value(), None);
        assert_eq!(form.execute_rpc.method.value(), None);
        assert!(form.data_to_value.compare_to_value.is_none());
        assert_eq!(form.raw_value(), GetValueSettings::default());
    }

    #[test]
    fn test_compare_to_value_only_for_boolean() {
        let settings = GetValueSettings {
            data_to_value: DataToValueSettings {
                compare_to_value: Some(json!("on")),
                ..Default::default()
            },
            ..Default::default()
        };

        let form = SettingsForm::new(Some(&settings), ValueType::Boolean);
        let compare = form.data_to_value.compare_to_value.as_ref().unwrap();
        assert_eq!(compare.value(), Some(&json!("on")));

        for kind in [ValueType::String, ValueType::Integer, ValueType::Double, ValueType::Json] {
            let form = SettingsForm::new(Some(&settings), kind);
            assert!(form.data_to_value.compare_to_value.is_none());
            assert_eq!(form.raw_value().data_to_value.compare_to_value, None);
        }
    }

    #[test]
    fn test_apply_plan_keeps_values() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::GetAttribute),
            get_attribute: GetAttributeSettings {
                scope: Some(AttributeScope::SharedScope),
                key: Some("mode".to_string()),
                subscribe_for_updates: Some(true),
            },
            ..Default::default()
        };
        let mut form = SettingsForm::new(Some(&settings), ValueType::String);

        let plan = derive_field_availability(Some(GetValueAction::ExecuteRpc), None, false);
        form.apply_plan(&plan);

        assert!(!form.get_attribute.is_enabled());
        assert!(!form.get_attribute.key.is_enabled());
        assert_eq!(form.get_attribute.key.value().map(String::as_str), Some("mode"));
        assert_eq!(form.raw_value().get_attribute, settings.get_attribute);
    }

    #[test]
    fn test_polling_interval_reenabled_with_group() {
        let mut form = SettingsForm::new(None, ValueType::String);

        form.apply_plan(&derive_field_availability(Some(GetValueAction::ExecuteRpc), None, false));
        assert!(form.execute_rpc.is_enabled());
        assert!(!form.execute_rpc.persistent_polling_interval.is_enabled());

        form.apply_plan(&derive_field_availability(Some(GetValueAction::ExecuteRpc), None, true));
        assert!(form.execute_rpc.persistent_polling_interval.is_enabled());
    }
}
