use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, Button, Popover};
use log::{error, info};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use value_settings::config::SettingsFile;
use value_settings::ui::{GetValueActionPanel, PopoverHost};
use value_settings_core::{PanelInputs, SettingsFormController};
use value_settings_types::{GetValueSettings, TargetDevice, ValueType};

const APP_ID: &str = "com.github.value_settings.get_value";

/// Edit how a dashboard widget gets its value
#[derive(Parser, Debug, Clone)]
#[command(name = "value-settings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Kind of value the widget edits (string, integer, double, boolean, json)
    #[arg(short = 'v', long = "value-type", default_value = "string")]
    value_type: ValueType,

    /// Panel title
    #[arg(short = 't', long = "title", default_value = "Get value")]
    title: String,

    /// Target device id
    #[arg(long = "device-id", value_name = "ID")]
    device_id: Option<String>,

    /// Target entity alias id
    #[arg(long = "entity-alias", value_name = "ALIAS_ID", conflicts_with = "device_id")]
    entity_alias: Option<String>,

    /// Print applied settings to stdout instead of saving them
    #[arg(short = 'p', long = "print")]
    print: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Settings file to edit (defaults to the per-user config directory)
    #[arg(value_name = "SETTINGS_FILE")]
    settings_file: Option<PathBuf>,
}

impl Cli {
    fn target_device(&self) -> TargetDevice {
        match (&self.device_id, &self.entity_alias) {
            (Some(id), _) => TargetDevice::device(id.clone()),
            (None, Some(alias)) => TargetDevice::entity_alias(alias.clone()),
            (None, None) => TargetDevice::default(),
        }
    }
}

fn main() -> glib::ExitCode {
    let cli = Cli::parse();

    // Allow RUST_LOG to override the -d/--debug level
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let settings_file = match &cli.settings_file {
        Some(path) => SettingsFile::new(path.clone()),
        None => match SettingsFile::default_location() {
            Ok(file) => file,
            Err(e) => {
                error!("{:#}", e);
                return glib::ExitCode::FAILURE;
            }
        },
    };
    info!("Editing {}", settings_file.path().display());

    // An unreadable file is left alone rather than replaced on apply
    let initial = match settings_file.load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("{:#}", e);
            return glib::ExitCode::FAILURE;
        }
    };
    if initial.is_none() {
        info!("No settings in {}, starting empty", settings_file.path().display());
    }

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        build_ui(app, &cli, &settings_file, initial.clone());
    });

    // Arguments were already parsed by clap
    app.run_with_args(&["value-settings"])
}

fn build_ui(
    app: &Application,
    cli: &Cli,
    settings_file: &SettingsFile,
    initial: Option<GetValueSettings>,
) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Value settings")
        .default_width(360)
        .default_height(120)
        .build();

    let open_button = Button::with_label("Configure value source...");
    open_button.set_margin_start(24);
    open_button.set_margin_end(24);
    open_button.set_margin_top(24);
    open_button.set_margin_bottom(24);
    window.set_child(Some(&open_button));

    let popover = Popover::new();
    popover.set_parent(&open_button);
    popover.set_autohide(true);

    let host = Rc::new(PopoverHost::new(&popover));
    let mut inputs = PanelInputs::new(cli.value_type, host)
        .with_title(cli.title.as_str())
        .with_target_device(cli.target_device());
    inputs.settings = initial;
    let mut controller = SettingsFormController::new(inputs);

    let file = settings_file.clone();
    let print = cli.print;
    let popover_for_apply = popover.clone();
    controller.set_on_applied(move |settings| {
        if print {
            match serde_json::to_string_pretty(settings) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize settings: {}", e),
            }
        } else {
            match file.save(settings) {
                Ok(()) => info!("Saved settings to {}", file.path().display()),
                Err(e) => error!("Failed to save settings: {:#}", e),
            }
        }
        popover_for_apply.popdown();
    });

    let panel = GetValueActionPanel::new(Rc::new(RefCell::new(controller)));
    popover.set_child(Some(panel.widget()));

    let popover_for_open = popover.clone();
    open_button.connect_clicked(move |_| {
        popover_for_open.popup();
    });

    // Popover must be unparented before its parent goes away
    open_button.connect_destroy(move |_| {
        popover.unparent();
    });

    window.present();
}
