//! Get-value settings file

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use value_settings_types::GetValueSettings;

/// A JSON file holding one widget's get-value settings
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File in the per-user configuration directory
    pub fn default_location() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "github.value_settings", "value-settings")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(Self::new(dirs.config_dir().join("get-value-settings.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file or a `null` document yields `None`
    pub fn load(&self) -> Result<Option<GetValueSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings = serde_json::from_str::<Option<GetValueSettings>>(&content)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, settings: &GetValueSettings) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}
