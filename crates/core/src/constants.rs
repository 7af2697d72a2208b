//! Shared constants for the settings form

/// Minimum RPC request timeout in milliseconds
pub const MIN_REQUEST_TIMEOUT_MS: i64 = 5000;

/// Minimum polling interval for persistent RPC requests in milliseconds
pub const MIN_POLLING_INTERVAL_MS: i64 = 1000;

/// Names visible inside any widget function besides its own arguments
pub const DEFAULT_WIDGET_SCOPE_VARIABLES: &[&str] = &["tinycolor", "cssjs", "moment", "$", "jQuery"];

/// Arguments of the data-to-value function
pub const DATA_TO_VALUE_FUNCTION_ARGS: &[&str] = &["data"];
