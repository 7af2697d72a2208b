//! Widget builder helpers for consistent UI construction
//!
//! Row helpers keep the label + control layout uniform across the panel, and
//! `ControllerBinding` wires a control to a controller setter followed by a
//! change notification.

use gtk4::prelude::*;
use gtk4::{
    Box as GtkBox, CheckButton, DropDown, Entry, Label, Orientation, StringList, TextView, Widget,
};
use std::cell::RefCell;
use std::rc::Rc;
use value_settings_core::SettingsFormController;

/// Type alias for the common on_change callback pattern
pub type OnChangeCallback = Rc<RefCell<Option<Box<dyn Fn()>>>>;

/// Invoke change callback if one is set.
pub fn notify_change(on_change: &OnChangeCallback) {
    if let Some(cb) = on_change.borrow().as_ref() {
        cb();
    }
}

/// Default margin used for page containers
pub const DEFAULT_MARGIN: i32 = 12;

/// Default spacing used for vertical containers
pub const DEFAULT_SPACING: i32 = 12;

/// Default spacing used for horizontal label+control rows
pub const ROW_SPACING: i32 = 6;

/// Creates a box with standard margins.
pub fn create_padded_box(orientation: Orientation, spacing: i32) -> GtkBox {
    let container = GtkBox::new(orientation, spacing);
    container.set_margin_start(DEFAULT_MARGIN);
    container.set_margin_end(DEFAULT_MARGIN);
    container.set_margin_top(DEFAULT_MARGIN);
    container.set_margin_bottom(DEFAULT_MARGIN);
    container
}

/// Creates a horizontal box containing a label and a widget.
pub fn create_labeled_row<W: IsA<Widget>>(label_text: &str, widget: &W) -> GtkBox {
    let row = GtkBox::new(Orientation::Horizontal, ROW_SPACING);
    row.append(&Label::new(Some(label_text)));
    widget.set_hexpand(true);
    row.append(widget);
    row
}

/// Creates a dropdown row with the given options and initial selection.
pub fn create_dropdown_row(label_text: &str, options: &[&str], selected: u32) -> (GtkBox, DropDown) {
    let string_list = StringList::new(options);
    let dropdown = DropDown::new(Some(string_list), Option::<gtk4::Expression>::None);
    dropdown.set_selected(selected);
    let row = create_labeled_row(label_text, &dropdown);
    (row, dropdown)
}

/// Creates a dropdown row whose first entry stands for "nothing selected".
///
/// A dropdown always shows some item, so an unset value needs its own entry.
/// Map positions back with [`optional_index`].
pub fn create_optional_dropdown_row(
    label_text: &str,
    placeholder: &str,
    options: &[&str],
    selected: Option<usize>,
) -> (GtkBox, DropDown) {
    let mut items = Vec::with_capacity(options.len() + 1);
    items.push(placeholder);
    items.extend_from_slice(options);
    create_dropdown_row(label_text, &items, optional_position(selected))
}

/// Dropdown position of an option index, 0 being the placeholder
pub fn optional_position(index: Option<usize>) -> u32 {
    index.map_or(0, |i| i as u32 + 1)
}

/// Option index of a dropdown position; the placeholder maps to `None`
pub fn optional_index(position: u32) -> Option<usize> {
    match position {
        0 | gtk4::INVALID_LIST_POSITION => None,
        position => Some(position as usize - 1),
    }
}

/// Creates a text entry row with placeholder and initial text.
pub fn create_entry_row(label_text: &str, placeholder: &str, text: &str) -> (GtkBox, Entry) {
    let entry = Entry::new();
    entry.set_placeholder_text(Some(placeholder));
    entry.set_text(text);
    let row = create_labeled_row(label_text, &entry);
    (row, entry)
}

/// Creates a check button with the given label.
pub fn create_check_button(label_text: &str, active: bool) -> CheckButton {
    let check = CheckButton::with_label(label_text);
    check.set_active(active);
    check
}

/// Creates a section header label with bold styling.
pub fn create_section_header(text: &str) -> Label {
    let label = Label::new(Some(text));
    label.set_halign(gtk4::Align::Start);
    label.add_css_class("heading");
    label
}

/// Creates a horizontal separator line.
pub fn create_separator() -> gtk4::Separator {
    gtk4::Separator::new(Orientation::Horizontal)
}

/// Text of an entry, `None` when empty
fn entry_value(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Connects controls to controller setters.
///
/// Every handler runs the setter with a mutable borrow, releases it, then
/// invokes the change callback.
pub struct ControllerBinding {
    controller: Rc<RefCell<SettingsFormController>>,
    on_change: OnChangeCallback,
}

impl ControllerBinding {
    pub fn new(controller: Rc<RefCell<SettingsFormController>>, on_change: OnChangeCallback) -> Self {
        Self {
            controller,
            on_change,
        }
    }

    /// Connects an entry; empty text stores `None`.
    pub fn connect_entry<F>(&self, entry: &Entry, update_fn: F)
    where
        F: Fn(&mut SettingsFormController, Option<String>) + 'static,
    {
        let controller = self.controller.clone();
        let on_change = self.on_change.clone();

        entry.connect_changed(move |entry| {
            update_fn(&mut controller.borrow_mut(), entry_value(entry.text().as_str()));
            notify_change(&on_change);
        });
    }

    /// Connects a multi-line text view; empty text stores `None`.
    pub fn connect_text_view<F>(&self, view: &TextView, update_fn: F)
    where
        F: Fn(&mut SettingsFormController, Option<String>) + 'static,
    {
        let controller = self.controller.clone();
        let on_change = self.on_change.clone();

        view.buffer().connect_changed(move |buffer| {
            let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
            update_fn(&mut controller.borrow_mut(), entry_value(text.as_str()));
            notify_change(&on_change);
        });
    }

    /// Connects a dropdown selection change.
    pub fn connect_dropdown<F>(&self, dropdown: &DropDown, update_fn: F)
    where
        F: Fn(&mut SettingsFormController, u32) + 'static,
    {
        let controller = self.controller.clone();
        let on_change = self.on_change.clone();

        dropdown.connect_selected_notify(move |dropdown| {
            update_fn(&mut controller.borrow_mut(), dropdown.selected());
            notify_change(&on_change);
        });
    }

    /// Connects a check button toggle.
    pub fn connect_check<F>(&self, check: &CheckButton, update_fn: F)
    where
        F: Fn(&mut SettingsFormController, bool) + 'static,
    {
        let controller = self.controller.clone();
        let on_change = self.on_change.clone();

        check.connect_toggled(move |check| {
            update_fn(&mut controller.borrow_mut(), check.is_active());
            notify_change(&on_change);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_value() {
        assert_eq!(entry_value(""), None);
        assert_eq!(entry_value("temp"), Some("temp".to_string()));
    }

    #[test]
    fn test_optional_positions() {
        assert_eq!(optional_position(None), 0);
        assert_eq!(optional_position(Some(2)), 3);
        assert_eq!(optional_index(0), None);
        assert_eq!(optional_index(3), Some(2));
        assert_eq!(optional_index(gtk4::INVALID_LIST_POSITION), None);
    }
}
