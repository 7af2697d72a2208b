//! value-settings-types: Shared data types for get-value action settings.
//!
//! This crate contains pure data types (the settings record, action and
//! transform enums, value kinds, target descriptors) shared by the form
//! logic and the GTK panel. It has no GTK dependency.

pub mod action;
pub mod settings;
pub mod target;
pub mod telemetry;
pub mod value_type;

// Re-export commonly used types at the crate root for convenience
pub use action::{DataToValueType, GetValueAction};
pub use settings::{
    DataToValueSettings, ExecuteRpcSettings, GetAttributeSettings, GetTimeSeriesSettings,
    GetValueSettings,
};
pub use target::{TargetDevice, TargetDeviceType};
pub use telemetry::{AttributeScope, DataKeyType};
pub use value_type::ValueType;
