//! Configuration management

mod settings;

pub use settings::SettingsFile;
