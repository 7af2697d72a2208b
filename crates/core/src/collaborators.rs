//! Traits for the services a settings panel talks to

use value_settings_types::{TargetDevice, TargetDeviceType};

use crate::constants::{DATA_TO_VALUE_FUNCTION_ARGS, DEFAULT_WIDGET_SCOPE_VARIABLES};

/// Whatever hosts the panel (popover, dialog, ...)
pub trait PanelHost {
    /// Dismiss the panel
    fn hide(&self);
}

/// Entity a target device resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub entity_type: String,
    pub id: String,
    pub name: Option<String>,
}

/// Resolves entity aliases used by target devices
pub trait AliasController {
    fn resolve_target_entity(&self, target: &TargetDevice) -> Option<EntityRef>;
}

/// Alias controller for dashboards without aliases: device targets map to
/// themselves, alias targets resolve to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectAliasController;

impl AliasController for DirectAliasController {
    fn resolve_target_entity(&self, target: &TargetDevice) -> Option<EntityRef> {
        match target.target_type {
            TargetDeviceType::Device => target
                .device_id
                .as_ref()
                .filter(|id| !id.is_empty())
                .map(|id| EntityRef {
                    entity_type: "DEVICE".to_string(),
                    id: id.clone(),
                    name: None,
                }),
            TargetDeviceType::Entity => None,
        }
    }
}

/// Names available inside user-authored widget functions
pub trait ScopeVariables {
    fn widget_scope_variables(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScopeVariables;

impl ScopeVariables for DefaultScopeVariables {
    fn widget_scope_variables(&self) -> Vec<String> {
        DATA_TO_VALUE_FUNCTION_ARGS
            .iter()
            .chain(DEFAULT_WIDGET_SCOPE_VARIABLES)
            .map(|name| name.to_string())
            .collect()
    }
}
