//! Form validators.
//!
//! Only enabled controls are validated. A value that is absent or an empty
//! string/array fails `Required`; `Min` ignores absent values so that an
//! empty numeric field reports only `Required`.

use serde_json::Value;
use thiserror::Error;
use value_settings_types::{AttributeScope, DataToValueType, GetValueAction};

use crate::availability::FieldPath;
use crate::constants::{MIN_POLLING_INTERVAL_MS, MIN_REQUEST_TIMEOUT_MS};
use crate::form::{Control, SettingsForm};

/// Rule attached to a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    Min(i64),
}

/// What went wrong with a control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationKind {
    #[error("value is required")]
    Required,
    #[error("must be at least {min}, got {actual}")]
    Min { min: i64, actual: i64 },
}

/// A violation on one enabled control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: FieldPath,
    pub kind: ValidationKind,
}

/// Validators for each control
pub fn validators_for(field: FieldPath) -> &'static [Validator] {
    match field {
        FieldPath::DefaultValue
        | FieldPath::RpcMethod
        | FieldPath::AttributeKey
        | FieldPath::TimeSeriesKey
        | FieldPath::DataToValueType
        | FieldPath::DataToValueFunction
        | FieldPath::CompareToValue => &[Validator::Required],
        FieldPath::RpcRequestTimeout => &[Validator::Required, Validator::Min(MIN_REQUEST_TIMEOUT_MS)],
        FieldPath::RpcPersistentPollingInterval => {
            &[Validator::Required, Validator::Min(MIN_POLLING_INTERVAL_MS)]
        }
        _ => &[],
    }
}

/// Value shapes the validators understand
pub(crate) trait InputValue {
    fn is_empty_input(&self) -> bool {
        false
    }

    fn as_number(&self) -> Option<i64> {
        None
    }
}

impl InputValue for String {
    fn is_empty_input(&self) -> bool {
        self.is_empty()
    }
}

impl InputValue for Value {
    fn is_empty_input(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    fn as_number(&self) -> Option<i64> {
        self.as_i64()
    }
}

impl InputValue for i64 {
    fn as_number(&self) -> Option<i64> {
        Some(*self)
    }
}

impl InputValue for bool {}
impl InputValue for GetValueAction {}
impl InputValue for DataToValueType {}
impl InputValue for AttributeScope {}

fn check<T: InputValue>(field: FieldPath, control: &Control<T>, errors: &mut Vec<ValidationError>) {
    if !control.is_enabled() {
        return;
    }
    for validator in validators_for(field) {
        match *validator {
            Validator::Required => {
                if control.value().map_or(true, InputValue::is_empty_input) {
                    errors.push(ValidationError {
                        field,
                        kind: ValidationKind::Required,
                    });
                }
            }
            Validator::Min(min) => {
                if let Some(actual) = control.value().and_then(InputValue::as_number) {
                    if actual < min {
                        errors.push(ValidationError {
                            field,
                            kind: ValidationKind::Min { min, actual },
                        });
                    }
                }
            }
        }
    }
}

/// Every violation on the enabled controls of the form
pub fn validate(form: &SettingsForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check(FieldPath::Action, &form.action, &mut errors);
    check(FieldPath::DefaultValue, &form.default_value, &mut errors);

    let rpc = &form.execute_rpc;
    check(FieldPath::RpcMethod, &rpc.method, &mut errors);
    check(FieldPath::RpcRequestTimeout, &rpc.request_timeout, &mut errors);
    check(FieldPath::RpcRequestPersistent, &rpc.request_persistent, &mut errors);
    check(
        FieldPath::RpcPersistentPollingInterval,
        &rpc.persistent_polling_interval,
        &mut errors,
    );

    let attribute = &form.get_attribute;
    check(FieldPath::AttributeScope, &attribute.scope, &mut errors);
    check(FieldPath::AttributeKey, &attribute.key, &mut errors);
    check(
        FieldPath::AttributeSubscribeForUpdates,
        &attribute.subscribe_for_updates,
        &mut errors,
    );

    let time_series = &form.get_time_series;
    check(FieldPath::TimeSeriesKey, &time_series.key, &mut errors);
    check(
        FieldPath::TimeSeriesSubscribeForUpdates,
        &time_series.subscribe_for_updates,
        &mut errors,
    );

    let transform = &form.data_to_value;
    check(FieldPath::DataToValueType, &transform.data_type, &mut errors);
    check(
        FieldPath::DataToValueFunction,
        &transform.data_to_value_function,
        &mut errors,
    );
    if let Some(compare) = transform.compare_to_value.as_ref() {
        check(FieldPath::CompareToValue, compare, &mut errors);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::derive_field_availability;
    use serde_json::json;
    use value_settings_types::{ExecuteRpcSettings, GetValueSettings, ValueType};

    fn form_for(settings: &GetValueSettings, value_type: ValueType) -> SettingsForm {
        let mut form = SettingsForm::new(Some(settings), value_type);
        let plan = derive_field_availability(
            settings.action,
            settings.data_to_value.data_type,
            settings.execute_rpc.request_persistent.unwrap_or(false),
        );
        form.apply_plan(&plan);
        form
    }

    fn fields(errors: &[ValidationError]) -> Vec<FieldPath> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_disabled_controls_are_not_validated() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::DoNothing),
            default_value: Some(json!(false)),
            ..Default::default()
        };
        let form = form_for(&settings, ValueType::Boolean);
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn test_rpc_minimums() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::ExecuteRpc),
            execute_rpc: ExecuteRpcSettings {
                method: Some("getValue".to_string()),
                request_timeout: Some(4999),
                request_persistent: Some(true),
                persistent_polling_interval: Some(999),
            },
            data_to_value: value_settings_types::DataToValueSettings {
                data_type: Some(DataToValueType::None),
                ..Default::default()
            },
            ..Default::default()
        };
        let errors = validate(&form_for(&settings, ValueType::Integer));

        assert_eq!(
            errors,
            vec![
                ValidationError {
                    field: FieldPath::RpcRequestTimeout,
                    kind: ValidationKind::Min { min: 5000, actual: 4999 },
                },
                ValidationError {
                    field: FieldPath::RpcPersistentPollingInterval,
                    kind: ValidationKind::Min { min: 1000, actual: 999 },
                },
            ]
        );
    }

    #[test]
    fn test_polling_interval_required_only_when_persistent() {
        let mut settings = GetValueSettings {
            action: Some(GetValueAction::ExecuteRpc),
            execute_rpc: ExecuteRpcSettings {
                method: Some("getValue".to_string()),
                request_timeout: Some(5000),
                request_persistent: Some(false),
                persistent_polling_interval: None,
            },
            ..Default::default()
        };
        settings.data_to_value.data_type = Some(DataToValueType::None);
        assert!(validate(&form_for(&settings, ValueType::String)).is_empty());

        settings.execute_rpc.request_persistent = Some(true);
        let errors = validate(&form_for(&settings, ValueType::String));
        assert_eq!(fields(&errors), vec![FieldPath::RpcPersistentPollingInterval]);
        assert_eq!(errors[0].kind, ValidationKind::Required);
    }

    #[test]
    fn test_required_transform_fields() {
        let mut settings = GetValueSettings {
            action: Some(GetValueAction::GetTimeSeries),
            ..Default::default()
        };
        settings.get_time_series.key = Some("temperature".to_string());
        settings.data_to_value.data_type = Some(DataToValueType::Function);
        settings.data_to_value.data_to_value_function = Some(String::new());

        let errors = validate(&form_for(&settings, ValueType::Boolean));
        assert_eq!(
            fields(&errors),
            vec![FieldPath::DataToValueFunction, FieldPath::CompareToValue]
        );
    }

    #[test]
    fn test_empty_default_value_is_missing() {
        let settings = GetValueSettings {
            action: Some(GetValueAction::DoNothing),
            default_value: Some(json!("")),
            ..Default::default()
        };
        let errors = validate(&form_for(&settings, ValueType::String));
        assert_eq!(fields(&errors), vec![FieldPath::DefaultValue]);
    }

    #[test]
    fn test_error_message() {
        let error = ValidationError {
            field: FieldPath::RpcRequestTimeout,
            kind: ValidationKind::Min { min: 5000, actual: 100 },
        };
        assert_eq!(
            error.to_string(),
            "executeRpc.requestTimeout: must be at least 5000, got 100"
        );
    }
}
