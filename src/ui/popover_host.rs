//! Popover hosting for settings panels

use gtk4::prelude::*;
use gtk4::Popover;
use value_settings_core::PanelHost;

/// Hosts a panel inside a popover; dismissing pops it down
pub struct PopoverHost {
    popover: Popover,
}

impl PopoverHost {
    pub fn new(popover: &Popover) -> Self {
        Self {
            popover: popover.clone(),
        }
    }
}

impl PanelHost for PopoverHost {
    fn hide(&self) {
        self.popover.popdown();
    }
}
