//! value-settings: Get-value action settings panel for dashboard widgets
//!
//! This library provides:
//! - The GTK panel binding a `SettingsFormController` to widgets
//! - Popover hosting for the panel
//! - Loading and saving settings files

pub mod config;
pub mod ui;

// Re-export commonly used types
pub use config::SettingsFile;
pub use ui::{GetValueActionPanel, PopoverHost};
