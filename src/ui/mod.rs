//! UI components

mod get_value_action_panel;
mod popover_host;
pub mod widget_builder;

pub use get_value_action_panel::GetValueActionPanel;
pub use popover_host::PopoverHost;
