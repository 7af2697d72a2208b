//! value-settings-core: Form logic for get-value action settings.
//!
//! This crate holds the typed settings form, the pure field availability
//! derivation, validators, and the controller that owns one edit session.
//! Nothing here depends on GTK.

pub mod availability;
pub mod collaborators;
pub mod constants;
pub mod controller;
pub mod form;
pub mod validation;
pub mod value_parse;

pub use availability::{derive_field_availability, FieldAvailabilityPlan, FieldPath};
pub use collaborators::{
    AliasController, DefaultScopeVariables, DirectAliasController, EntityRef, PanelHost,
    ScopeVariables,
};
pub use constants::{
    DATA_TO_VALUE_FUNCTION_ARGS, DEFAULT_WIDGET_SCOPE_VARIABLES, MIN_POLLING_INTERVAL_MS,
    MIN_REQUEST_TIMEOUT_MS,
};
pub use controller::{PanelInputs, SettingsAppliedCallback, SettingsFormController};
pub use form::{
    Control, DataToValueGroup, ExecuteRpcGroup, GetAttributeGroup, GetTimeSeriesGroup, SettingsForm,
};
pub use validation::{validate, ValidationError, ValidationKind, Validator};
pub use value_parse::{
    format_loose, format_value, parse_loose, parse_millis, parse_value, ValueParseError,
};

// Re-export types used in controller signatures for convenience
pub use value_settings_types::{
    AttributeScope, DataToValueType, GetValueAction, GetValueSettings, TargetDevice, ValueType,
};
