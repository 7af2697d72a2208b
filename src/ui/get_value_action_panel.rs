//! Get-value action settings panel
//!
//! GTK view over a `SettingsFormController`. Sections for inactive value
//! sources are hidden, never cleared, so switching the action back shows the
//! earlier entries again.

use gtk4::prelude::*;
use gtk4::{Box as GtkBox, Button, Entry, Label, Orientation, ScrolledWindow, TextView};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;
use value_settings_core::{
    format_loose, format_value, AttributeScope, DataToValueType, GetValueAction, SettingsFormController,
    MIN_POLLING_INTERVAL_MS, MIN_REQUEST_TIMEOUT_MS,
};
use value_settings_types::DataKeyType;

use crate::ui::widget_builder::{
    create_check_button, create_entry_row, create_labeled_row, create_optional_dropdown_row,
    create_padded_box, create_section_header, create_separator, notify_change, optional_index,
    ControllerBinding, OnChangeCallback, DEFAULT_SPACING, ROW_SPACING,
};

/// Widgets whose state follows the controller
struct PanelWidgets {
    default_value_row: GtkBox,
    rpc_box: GtkBox,
    polling_row: GtkBox,
    attribute_box: GtkBox,
    time_series_box: GtkBox,
    transform_box: GtkBox,
    function_box: GtkBox,
    errors_label: Label,
    apply_button: Button,
}

/// Panel for configuring how a widget gets its value
pub struct GetValueActionPanel {
    widget: GtkBox,
    controller: Rc<RefCell<SettingsFormController>>,
}

/// Entry text of an optional millisecond value
fn millis_text(value: Option<&i64>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

fn show_parse_state(entry: &Entry, ok: bool) {
    if ok {
        entry.remove_css_class("error");
    } else {
        entry.add_css_class("error");
    }
}

/// Mirror enabled flags and validity of the controller into the widgets
fn sync_state(widgets: &PanelWidgets, controller: &SettingsFormController) {
    let form = controller.form();

    widgets
        .default_value_row
        .set_visible(form.default_value.is_enabled());
    widgets.rpc_box.set_visible(form.execute_rpc.is_enabled());
    widgets
        .polling_row
        .set_sensitive(form.execute_rpc.persistent_polling_interval.is_enabled());
    widgets
        .attribute_box
        .set_visible(form.get_attribute.is_enabled());
    widgets
        .time_series_box
        .set_visible(form.get_time_series.is_enabled());
    widgets
        .transform_box
        .set_visible(form.data_to_value.is_enabled());
    widgets
        .function_box
        .set_visible(form.data_to_value.data_to_value_function.is_enabled());

    let errors = controller.errors();
    if errors.is_empty() {
        widgets.errors_label.set_text("");
    } else {
        let text = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        widgets.errors_label.set_text(&text);
    }
    widgets.errors_label.set_visible(!errors.is_empty());
    widgets.apply_button.set_sensitive(errors.is_empty());
}

impl GetValueActionPanel {
    pub fn new(controller: Rc<RefCell<SettingsFormController>>) -> Self {
        let widget = create_padded_box(Orientation::Vertical, DEFAULT_SPACING);
        let on_change: OnChangeCallback = Rc::new(RefCell::new(None));
        let binding = ControllerBinding::new(controller.clone(), on_change.clone());

        // Populate every control from the form before any handler is connected
        let ctrl = controller.borrow();
        let form = ctrl.form();

        if !ctrl.title().is_empty() {
            widget.append(&create_section_header(ctrl.title()));
        }

        // Action
        let action_labels: Vec<&str> = GetValueAction::ALL.iter().map(|a| a.label()).collect();
        let (action_row, action_dropdown) = create_optional_dropdown_row(
            "Action:",
            "Select action",
            &action_labels,
            form.action.value().map(|a| a.index()),
        );
        widget.append(&action_row);

        // Default value
        let default_text = form
            .default_value
            .value()
            .map(|v| format_value(ctrl.value_type(), v))
            .unwrap_or_default();
        let (default_value_row, default_value_entry) = create_entry_row(
            "Default value:",
            ctrl.value_type().label(),
            &default_text,
        );
        widget.append(&default_value_row);

        // RPC
        let rpc = &form.execute_rpc;
        let rpc_box = GtkBox::new(Orientation::Vertical, ROW_SPACING);
        let (method_row, method_entry) = create_entry_row(
            "Method:",
            "e.g. getValue",
            rpc.method.value().map(String::as_str).unwrap_or(""),
        );
        rpc_box.append(&method_row);
        let (timeout_row, timeout_entry) = create_entry_row(
            "Request timeout (ms):",
            &format!("at least {}", MIN_REQUEST_TIMEOUT_MS),
            &millis_text(rpc.request_timeout.value()),
        );
        rpc_box.append(&timeout_row);
        let persistent_check = create_check_button("Request persistent", rpc.is_request_persistent());
        rpc_box.append(&persistent_check);
        let (polling_row, polling_entry) = create_entry_row(
            "Polling interval (ms):",
            &format!("at least {}", MIN_POLLING_INTERVAL_MS),
            &millis_text(rpc.persistent_polling_interval.value()),
        );
        rpc_box.append(&polling_row);
        widget.append(&rpc_box);

        // Attribute
        let attribute = &form.get_attribute;
        let attribute_box = GtkBox::new(Orientation::Vertical, ROW_SPACING);
        let scope_labels: Vec<&str> = AttributeScope::ALL.iter().map(|s| s.label()).collect();
        let (scope_row, scope_dropdown) = create_optional_dropdown_row(
            "Scope:",
            "Select scope",
            &scope_labels,
            attribute.scope.value().map(|s| s.index()),
        );
        attribute_box.append(&scope_row);
        let (attribute_key_row, attribute_key_entry) = create_entry_row(
            &format!("{} key:", DataKeyType::Attribute.short_label()),
            "key",
            attribute.key.value().map(String::as_str).unwrap_or(""),
        );
        attribute_box.append(&attribute_key_row);
        let attribute_subscribe_check = create_check_button(
            "Subscribe for updates",
            attribute.subscribe_for_updates.value().copied().unwrap_or(false),
        );
        attribute_box.append(&attribute_subscribe_check);
        widget.append(&attribute_box);

        // Time series
        let time_series = &form.get_time_series;
        let time_series_box = GtkBox::new(Orientation::Vertical, ROW_SPACING);
        let (ts_key_row, ts_key_entry) = create_entry_row(
            &format!("{} key:", DataKeyType::Timeseries.short_label()),
            "key",
            time_series.key.value().map(String::as_str).unwrap_or(""),
        );
        time_series_box.append(&ts_key_row);
        let ts_subscribe_check = create_check_button(
            "Subscribe for updates",
            time_series.subscribe_for_updates.value().copied().unwrap_or(false),
        );
        time_series_box.append(&ts_subscribe_check);
        widget.append(&time_series_box);

        // Target hint for key based sources
        let target_text = ctrl.target_summary();
        let target_label = Label::new(Some(&target_text));
        target_label.set_halign(gtk4::Align::Start);
        target_label.add_css_class("dim-label");
        attribute_box.prepend(&target_label);
        let target_label_ts = Label::new(Some(&target_text));
        target_label_ts.set_halign(gtk4::Align::Start);
        target_label_ts.add_css_class("dim-label");
        time_series_box.prepend(&target_label_ts);

        // Transform
        let transform = &form.data_to_value;
        let transform_box = GtkBox::new(Orientation::Vertical, ROW_SPACING);
        transform_box.append(&create_separator());
        transform_box.append(&create_section_header("Action result conversion"));
        let type_labels: Vec<&str> = DataToValueType::ALL.iter().map(|t| t.label()).collect();
        let (type_row, type_dropdown) = create_optional_dropdown_row(
            "Convert:",
            "Select conversion",
            &type_labels,
            transform.data_type.value().map(|t| t.index()),
        );
        transform_box.append(&type_row);

        let function_box = GtkBox::new(Orientation::Vertical, ROW_SPACING);
        function_box.append(&Label::new(Some("function (data) {")));
        let function_view = TextView::new();
        function_view.set_monospace(true);
        function_view.buffer().set_text(
            transform
                .data_to_value_function
                .value()
                .map(String::as_str)
                .unwrap_or(""),
        );
        let function_scroll = ScrolledWindow::builder()
            .min_content_height(100)
            .min_content_width(320)
            .child(&function_view)
            .build();
        function_box.append(&function_scroll);
        let closing = Label::new(Some("}"));
        closing.set_halign(gtk4::Align::Start);
        function_box.append(&closing);
        let vars_label = Label::new(Some(&format!(
            "Available: {}",
            ctrl.function_scope_variables().join(", ")
        )));
        vars_label.set_halign(gtk4::Align::Start);
        vars_label.set_wrap(true);
        vars_label.add_css_class("dim-label");
        function_box.append(&vars_label);
        transform_box.append(&function_box);

        let compare_entry = transform.compare_to_value.as_ref().map(|compare| {
            let entry = Entry::new();
            entry.set_placeholder_text(Some("Value meaning 'true'"));
            entry.set_text(&compare.value().map(format_loose).unwrap_or_default());
            transform_box.append(&create_labeled_row("Compare to value:", &entry));
            entry
        });
        widget.append(&transform_box);

        // Validation + buttons
        let errors_label = Label::new(None);
        errors_label.set_halign(gtk4::Align::Start);
        errors_label.set_wrap(true);
        errors_label.add_css_class("error");
        widget.append(&errors_label);

        let button_box = GtkBox::new(Orientation::Horizontal, ROW_SPACING);
        button_box.set_halign(gtk4::Align::End);
        let cancel_button = Button::with_label("Cancel");
        let apply_button = Button::with_label("Apply");
        apply_button.add_css_class("suggested-action");
        button_box.append(&cancel_button);
        button_box.append(&apply_button);
        widget.append(&button_box);

        drop(ctrl);

        let widgets = Rc::new(PanelWidgets {
            default_value_row,
            rpc_box,
            polling_row,
            attribute_box,
            time_series_box,
            transform_box,
            function_box,
            errors_label,
            apply_button: apply_button.clone(),
        });

        let widgets_clone = widgets.clone();
        let controller_clone = controller.clone();
        *on_change.borrow_mut() = Some(Box::new(move || {
            sync_state(&widgets_clone, &controller_clone.borrow());
        }));

        // Wire up handlers
        binding.connect_dropdown(&action_dropdown, |c, selected| {
            let action = optional_index(selected).and_then(|i| GetValueAction::ALL.get(i).copied());
            debug!("Action changed to {:?}", action);
            c.set_action(action);
        });

        let controller_clone = controller.clone();
        let on_change_clone = on_change.clone();
        default_value_entry.connect_changed(move |entry| {
            let result = controller_clone
                .borrow_mut()
                .set_default_value_text(entry.text().as_str());
            show_parse_state(entry, result.is_ok());
            notify_change(&on_change_clone);
        });

        binding.connect_entry(&method_entry, |c, method| c.set_rpc_method(method));
        let controller_clone = controller.clone();
        let on_change_clone = on_change.clone();
        timeout_entry.connect_changed(move |entry| {
            let result = controller_clone
                .borrow_mut()
                .set_request_timeout_text(entry.text().as_str());
            show_parse_state(entry, result.is_ok());
            notify_change(&on_change_clone);
        });
        binding.connect_check(&persistent_check, |c, persistent| {
            c.set_request_persistent(persistent)
        });
        let controller_clone = controller.clone();
        let on_change_clone = on_change.clone();
        polling_entry.connect_changed(move |entry| {
            let result = controller_clone
                .borrow_mut()
                .set_persistent_polling_interval_text(entry.text().as_str());
            show_parse_state(entry, result.is_ok());
            notify_change(&on_change_clone);
        });

        binding.connect_dropdown(&scope_dropdown, |c, selected| {
            c.set_attribute_scope(optional_index(selected).and_then(|i| AttributeScope::ALL.get(i).copied()))
        });
        binding.connect_entry(&attribute_key_entry, |c, key| c.set_attribute_key(key));
        binding.connect_check(&attribute_subscribe_check, |c, subscribe| {
            c.set_attribute_subscribe_for_updates(subscribe)
        });

        binding.connect_entry(&ts_key_entry, |c, key| c.set_time_series_key(key));
        binding.connect_check(&ts_subscribe_check, |c, subscribe| {
            c.set_time_series_subscribe_for_updates(subscribe)
        });

        binding.connect_dropdown(&type_dropdown, |c, selected| {
            c.set_data_to_value_type(
                optional_index(selected).and_then(|i| DataToValueType::ALL.get(i).copied()),
            )
        });
        binding.connect_text_view(&function_view, |c, function| {
            c.set_data_to_value_function(function)
        });
        if let Some(entry) = compare_entry.as_ref() {
            binding.connect_entry(entry, |c, text| {
                c.set_compare_to_value_text(text.as_deref().unwrap_or(""));
            });
        }

        let controller_clone = controller.clone();
        cancel_button.connect_clicked(move |_| {
            controller_clone.borrow().cancel();
        });

        let controller_clone = controller.clone();
        apply_button.connect_clicked(move |_| {
            controller_clone.borrow().apply_settings();
        });

        sync_state(&widgets, &controller.borrow());

        Self { widget, controller }
    }

    pub fn widget(&self) -> &GtkBox {
        &self.widget
    }

    pub fn controller(&self) -> &Rc<RefCell<SettingsFormController>> {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_text() {
        assert_eq!(millis_text(Some(&900_000)), "900000");
        assert_eq!(millis_text(None), "");
    }
}
