//! Settings form controller.
//!
//! Owns the form for one edit session. Changing the action, the transform
//! type or the persistent-request flag re-derives field availability; every
//! other setter only stores the value. Plan application emits nothing, so
//! the only outgoing event is the applied-settings callback.

use std::rc::Rc;

use log::{debug, info, warn};
use serde_json::Value;
use value_settings_types::{
    AttributeScope, DataToValueType, GetValueAction, GetValueSettings, TargetDevice, ValueType,
};

use crate::availability::{derive_field_availability, FieldAvailabilityPlan};
use crate::collaborators::{
    AliasController, DefaultScopeVariables, DirectAliasController, EntityRef, PanelHost,
    ScopeVariables,
};
use crate::form::SettingsForm;
use crate::validation::{validate, ValidationError};
use crate::value_parse::{parse_loose, parse_millis, parse_value, ValueParseError};

/// Callback invoked with the finalized settings on apply
pub type SettingsAppliedCallback = Box<dyn Fn(&GetValueSettings)>;

/// Construction inputs of a settings panel
pub struct PanelInputs {
    pub settings: Option<GetValueSettings>,
    pub title: String,
    pub value_type: ValueType,
    pub alias_controller: Rc<dyn AliasController>,
    pub target_device: TargetDevice,
    pub host: Rc<dyn PanelHost>,
    pub scope_variables: Rc<dyn ScopeVariables>,
}

impl PanelInputs {
    /// Inputs with no initial settings, an empty title, no target and the
    /// default collaborators
    pub fn new(value_type: ValueType, host: Rc<dyn PanelHost>) -> Self {
        Self {
            settings: None,
            title: String::new(),
            value_type,
            alias_controller: Rc::new(DirectAliasController),
            target_device: TargetDevice::default(),
            host,
            scope_variables: Rc::new(DefaultScopeVariables),
        }
    }

    pub fn with_settings(mut self, settings: GetValueSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_target_device(mut self, target_device: TargetDevice) -> Self {
        self.target_device = target_device;
        self
    }

    pub fn with_alias_controller(mut self, alias_controller: Rc<dyn AliasController>) -> Self {
        self.alias_controller = alias_controller;
        self
    }

    pub fn with_scope_variables(mut self, scope_variables: Rc<dyn ScopeVariables>) -> Self {
        self.scope_variables = scope_variables;
        self
    }
}

pub struct SettingsFormController {
    form: SettingsForm,
    plan: FieldAvailabilityPlan,
    title: String,
    value_type: ValueType,
    alias_controller: Rc<dyn AliasController>,
    target_device: TargetDevice,
    host: Rc<dyn PanelHost>,
    function_scope_variables: Vec<String>,
    on_applied: Option<SettingsAppliedCallback>,
}

impl SettingsFormController {
    /// Build the form from the inputs and derive the initial availability
    pub fn new(inputs: PanelInputs) -> Self {
        let form = SettingsForm::new(inputs.settings.as_ref(), inputs.value_type);
        let function_scope_variables = inputs.scope_variables.widget_scope_variables();

        let mut controller = Self {
            form,
            plan: FieldAvailabilityPlan::default(),
            title: inputs.title,
            value_type: inputs.value_type,
            alias_controller: inputs.alias_controller,
            target_device: inputs.target_device,
            host: inputs.host,
            function_scope_variables,
            on_applied: None,
        };
        controller.update_availability();
        controller
    }

    /// Set the callback invoked when settings are applied
    pub fn set_on_applied<F: Fn(&GetValueSettings) + 'static>(&mut self, callback: F) {
        self.on_applied = Some(Box::new(callback));
    }

    fn update_availability(&mut self) {
        let plan = derive_field_availability(
            self.form.action.value().copied(),
            self.form.data_to_value.data_type.value().copied(),
            self.form.execute_rpc.is_request_persistent(),
        );
        debug!(
            "Field availability for action {:?}: {:?}",
            self.form.action.value(),
            plan
        );
        self.form.apply_plan(&plan);
        self.plan = plan;
    }

    // Monitored controls

    pub fn set_action(&mut self, action: Option<GetValueAction>) {
        self.form.action.set_value(action);
        self.update_availability();
    }

    pub fn set_data_to_value_type(&mut self, data_type: Option<DataToValueType>) {
        self.form.data_to_value.data_type.set_value(data_type);
        self.update_availability();
    }

    pub fn set_request_persistent(&mut self, persistent: bool) {
        self.form.execute_rpc.request_persistent.set_value(Some(persistent));
        self.update_availability();
    }

    // Plain controls

    pub fn set_default_value(&mut self, value: Option<Value>) {
        self.form.default_value.set_value(value);
    }

    /// Parse and store the default value as the widget's value kind.
    ///
    /// On error the stored value is left unchanged.
    pub fn set_default_value_text(&mut self, text: &str) -> Result<(), ValueParseError> {
        let value = parse_value(self.value_type, text)
            .inspect_err(|e| warn!("Rejected default value '{}': {}", text, e))?;
        self.form.default_value.set_value(value);
        Ok(())
    }

    pub fn set_rpc_method(&mut self, method: Option<String>) {
        self.form.execute_rpc.method.set_value(method);
    }

    pub fn set_request_timeout(&mut self, timeout_ms: Option<i64>) {
        self.form.execute_rpc.request_timeout.set_value(timeout_ms);
    }

    pub fn set_persistent_polling_interval(&mut self, interval_ms: Option<i64>) {
        self.form
            .execute_rpc
            .persistent_polling_interval
            .set_value(interval_ms);
    }

    /// Parse and store the request timeout. On error the stored value is
    /// left unchanged.
    pub fn set_request_timeout_text(&mut self, text: &str) -> Result<(), ValueParseError> {
        let timeout_ms = parse_millis(text)
            .inspect_err(|e| warn!("Rejected request timeout '{}': {}", text, e))?;
        self.set_request_timeout(timeout_ms);
        Ok(())
    }

    pub fn set_persistent_polling_interval_text(&mut self, text: &str) -> Result<(), ValueParseError> {
        let interval_ms = parse_millis(text)
            .inspect_err(|e| warn!("Rejected polling interval '{}': {}", text, e))?;
        self.set_persistent_polling_interval(interval_ms);
        Ok(())
    }

    pub fn set_attribute_scope(&mut self, scope: Option<AttributeScope>) {
        self.form.get_attribute.scope.set_value(scope);
    }

    pub fn set_attribute_key(&mut self, key: Option<String>) {
        self.form.get_attribute.key.set_value(key);
    }

    pub fn set_attribute_subscribe_for_updates(&mut self, subscribe: bool) {
        self.form
            .get_attribute
            .subscribe_for_updates
            .set_value(Some(subscribe));
    }

    pub fn set_time_series_key(&mut self, key: Option<String>) {
        self.form.get_time_series.key.set_value(key);
    }

    pub fn set_time_series_subscribe_for_updates(&mut self, subscribe: bool) {
        self.form
            .get_time_series
            .subscribe_for_updates
            .set_value(Some(subscribe));
    }

    pub fn set_data_to_value_function(&mut self, function: Option<String>) {
        self.form
            .data_to_value
            .data_to_value_function
            .set_value(function);
    }

    /// Store the compare-to value. Returns false when the widget is not
    /// boolean and the control does not exist.
    pub fn set_compare_to_value(&mut self, value: Option<Value>) -> bool {
        match self.form.data_to_value.compare_to_value.as_mut() {
            Some(compare) => {
                compare.set_value(value);
                true
            }
            None => {
                warn!(
                    "Ignoring compareToValue for a {} widget",
                    self.value_type.label()
                );
                false
            }
        }
    }

    /// Like [`Self::set_compare_to_value`], reading JSON literals and
    /// falling back to plain text
    pub fn set_compare_to_value_text(&mut self, text: &str) -> bool {
        self.set_compare_to_value(parse_loose(text))
    }

    // Actions

    /// Emit the raw value of every control, enabled or not
    pub fn apply_settings(&self) {
        let settings = self.form.raw_value();
        info!(
            "Applying get-value settings (action {:?})",
            settings.action
        );
        if let Some(callback) = self.on_applied.as_ref() {
            callback(&settings);
        }
    }

    /// Ask the host to dismiss the panel
    pub fn cancel(&self) {
        info!("Get-value settings panel cancelled");
        self.host.hide();
    }

    // Accessors

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn plan(&self) -> &FieldAvailabilityPlan {
        &self.plan
    }

    pub fn raw_value(&self) -> GetValueSettings {
        self.form.raw_value()
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        validate(&self.form)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn target_device(&self) -> &TargetDevice {
        &self.target_device
    }

    /// Entity whose keys the attribute and time-series inputs refer to
    pub fn target_entity(&self) -> Option<EntityRef> {
        self.alias_controller
            .resolve_target_entity(&self.target_device)
    }

    /// One-line description of the target for key based sources
    pub fn target_summary(&self) -> String {
        if !self.target_device.is_set() {
            return "Target: none".to_string();
        }
        match self.target_entity() {
            Some(entity) => format!(
                "Target: {} {}",
                entity.entity_type,
                entity.name.unwrap_or(entity.id)
            ),
            None => "Target: not resolved".to_string(),
        }
    }

    /// Variables usable inside the data-to-value function
    pub fn function_scope_variables(&self) -> &[String] {
        &self.function_scope_variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::FieldPath;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use value_settings_types::{DataToValueSettings, GetAttributeSettings};

    #[derive(Default)]
    struct RecordingHost {
        hidden: Cell<u32>,
    }

    impl PanelHost for RecordingHost {
        fn hide(&self) {
            self.hidden.set(self.hidden.get() + 1);
        }
    }

    fn attribute_settings() -> GetValueSettings {
        GetValueSettings {
            action: Some(GetValueAction::GetAttribute),
            get_attribute: GetAttributeSettings {
                scope: Some(AttributeScope::ServerScope),
                key: Some("temp".to_string()),
                subscribe_for_updates: None,
            },
            data_to_value: DataToValueSettings {
                data_type: Some(DataToValueType::None),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn build_controller(
        settings: Option<GetValueSettings>,
        value_type: ValueType,
    ) -> (SettingsFormController, Rc<RecordingHost>) {
        let host = Rc::new(RecordingHost::default());
        let mut inputs = PanelInputs::new(value_type, host.clone()).with_title("Get value");
        inputs.settings = settings;
        (SettingsFormController::new(inputs), host)
    }

    #[test]
    fn test_initial_attribute_settings() {
        let (controller, _) = build_controller(Some(attribute_settings()), ValueType::String);
        let form = controller.form();

        assert!(form.get_attribute.is_enabled());
        assert_eq!(form.get_attribute.key.value().map(String::as_str), Some("temp"));
        assert!(!form.execute_rpc.is_enabled());
        assert!(!form.default_value.is_enabled());
        assert!(!form.get_time_series.is_enabled());
        assert!(form.data_to_value.is_enabled());
        assert!(!form.data_to_value.data_to_value_function.is_enabled());
        assert!(form.data_to_value.compare_to_value.is_none());
        assert!(controller.is_valid());
    }

    #[test]
    fn test_switch_to_persistent_rpc() {
        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::String);

        controller.set_action(Some(GetValueAction::ExecuteRpc));
        controller.set_request_persistent(true);

        let form = controller.form();
        assert!(form.execute_rpc.is_enabled());
        assert!(form.execute_rpc.persistent_polling_interval.is_enabled());
        assert!(!form.get_attribute.is_enabled());
        assert_eq!(
            controller.raw_value().get_attribute,
            attribute_settings().get_attribute
        );

        let missing: Vec<FieldPath> = controller.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            missing,
            vec![
                FieldPath::RpcMethod,
                FieldPath::RpcRequestTimeout,
                FieldPath::RpcPersistentPollingInterval,
            ]
        );
    }

    #[test]
    fn test_toggle_action_restores_values() {
        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::String);
        controller.set_action(Some(GetValueAction::GetTimeSeries));
        controller.set_time_series_key(Some("humidity".to_string()));
        let before = controller.raw_value();

        controller.set_action(Some(GetValueAction::GetAttribute));
        controller.set_action(Some(GetValueAction::GetTimeSeries));

        assert_eq!(controller.raw_value(), before);
        assert_eq!(
            controller.raw_value().get_attribute.key.as_deref(),
            Some("temp")
        );
    }

    #[test]
    fn test_plain_setters_do_not_rederive() {
        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::String);
        let plan = *controller.plan();
        controller.set_attribute_key(Some("pressure".to_string()));
        controller.set_rpc_method(Some("getState".to_string()));
        assert_eq!(*controller.plan(), plan);
    }

    #[test]
    fn test_function_type_enables_function() {
        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::String);
        controller.set_data_to_value_type(Some(DataToValueType::Function));
        assert!(controller.form().data_to_value.data_to_value_function.is_enabled());
        assert!(!controller.is_valid());

        controller.set_data_to_value_function(Some("return data;".to_string()));
        assert!(controller.is_valid());
    }

    #[test]
    fn test_apply_emits_raw_settings_once() {
        let (mut controller, host) = build_controller(Some(attribute_settings()), ValueType::Boolean);
        let applied: Rc<RefCell<Vec<GetValueSettings>>> = Rc::new(RefCell::new(Vec::new()));
        let applied_clone = applied.clone();
        controller.set_on_applied(move |settings| applied_clone.borrow_mut().push(settings.clone()));

        controller.set_action(Some(GetValueAction::DoNothing));
        controller.set_default_value_text("true").unwrap();
        controller.apply_settings();

        let applied = applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].default_value, Some(json!(true)));
        assert_eq!(applied[0].get_attribute.key.as_deref(), Some("temp"));
        assert_eq!(host.hidden.get(), 0);
    }

    #[test]
    fn test_cancel_hides_without_emitting() {
        let (mut controller, host) = build_controller(None, ValueType::String);
        let emitted = Rc::new(Cell::new(0));
        let emitted_clone = emitted.clone();
        controller.set_on_applied(move |_| emitted_clone.set(emitted_clone.get() + 1));

        controller.cancel();

        assert_eq!(host.hidden.get(), 1);
        assert_eq!(emitted.get(), 0);
    }

    #[test]
    fn test_compare_to_value_only_on_boolean_widgets() {
        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::Boolean);
        assert!(!controller.is_valid());
        assert!(controller.set_compare_to_value_text("on"));
        assert!(controller.is_valid());
        assert_eq!(
            controller.raw_value().data_to_value.compare_to_value,
            Some(json!("on"))
        );

        let (mut controller, _) = build_controller(Some(attribute_settings()), ValueType::Integer);
        assert!(!controller.set_compare_to_value(Some(json!(1))));
        assert_eq!(controller.raw_value().data_to_value.compare_to_value, None);
    }

    #[test]
    fn test_invalid_default_text_keeps_value() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::DoNothing),
            default_value: Some(json!(7)),
            ..Default::default()
        };
        let (mut controller, _) = build_controller(Some(settings), ValueType::Integer);
        assert!(controller.set_default_value_text("seven").is_err());
        assert_eq!(controller.form().default_value.value(), Some(&json!(7)));
    }

    #[test]
    fn test_millis_text_setters() {
        let (mut controller, _) = build_controller(None, ValueType::String);
        controller.set_action(Some(GetValueAction::ExecuteRpc));

        controller.set_request_timeout_text("900000").unwrap();
        assert_eq!(controller.form().execute_rpc.request_timeout.value(), Some(&900_000));

        assert!(controller.set_request_timeout_text("later").is_err());
        assert_eq!(controller.form().execute_rpc.request_timeout.value(), Some(&900_000));

        controller.set_persistent_polling_interval_text("").unwrap();
        assert_eq!(controller.form().execute_rpc.persistent_polling_interval.value(), None);
    }

    #[test]
    fn test_compare_text_keeps_string_type() {
        let mut settings = attribute_settings();
        settings.data_to_value.compare_to_value = Some(json!("1"));
        let (mut controller, _) = build_controller(Some(settings), ValueType::Boolean);

        let text = crate::value_parse::format_loose(
            controller.form().data_to_value.compare_to_value.as_ref().unwrap().value().unwrap(),
        );
        controller.set_compare_to_value_text(&text);

        assert_eq!(
            controller.raw_value().data_to_value.compare_to_value,
            Some(json!("1"))
        );
    }

    #[test]
    fn test_target_summary() {
        let (controller, _) = build_controller(None, ValueType::String);
        assert_eq!(controller.target_summary(), "Target: none");

        let host = Rc::new(RecordingHost::default());
        let inputs = PanelInputs::new(ValueType::String, host.clone())
            .with_target_device(TargetDevice::device("abc"));
        let controller = SettingsFormController::new(inputs);
        assert_eq!(controller.target_summary(), "Target: DEVICE abc");

        let inputs = PanelInputs::new(ValueType::String, host)
            .with_target_device(TargetDevice::entity_alias("alias-1"));
        let controller = SettingsFormController::new(inputs);
        assert_eq!(controller.target_summary(), "Target: not resolved");
    }

    #[test]
    fn test_absent_settings() {
        let (controller, _) = build_controller(None, ValueType::String);
        assert_eq!(controller.plan().active_source(), None);
        assert!(controller.form().data_to_value.is_enabled());
        assert_eq!(controller.title(), "Get value");
        assert!(controller.target_entity().is_none());
        assert!(controller
            .function_scope_variables()
            .iter()
            .any(|v| v == "data"));
    }
}
