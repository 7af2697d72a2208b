//! Target device descriptor.

use serde::{Deserialize, Serialize};

/// How the target of an action is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetDeviceType {
    /// A concrete device id
    #[default]
    Device,
    /// An entity alias resolved by the dashboard
    Entity,
}

/// Device or entity alias the value is fetched from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TargetDevice {
    #[serde(rename = "type", default)]
    pub target_type: TargetDeviceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_alias_id: Option<String>,
}

impl TargetDevice {
    pub fn device(device_id: impl Into<String>) -> Self {
        Self {
            target_type: TargetDeviceType::Device,
            device_id: Some(device_id.into()),
            entity_alias_id: None,
        }
    }

    pub fn entity_alias(alias_id: impl Into<String>) -> Self {
        Self {
            target_type: TargetDeviceType::Entity,
            device_id: None,
            entity_alias_id: Some(alias_id.into()),
        }
    }

    /// True when the descriptor points somewhere
    pub fn is_set(&self) -> bool {
        match self.target_type {
            TargetDeviceType::Device => self.device_id.as_deref().is_some_and(|id| !id.is_empty()),
            TargetDeviceType::Entity => self
                .entity_alias_id
                .as_deref()
                .is_some_and(|id| !id.is_empty()),
        }
    }
}
