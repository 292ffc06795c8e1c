// FuelWiseLog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation (debug mode support)
// 3. Opening the fuel database and restoring preferences
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can
// use `crate::app::...`, `crate::core::...` etc.
pub use fuelwiselog::app;

pub use fuelwiselog::core;
pub use fuelwiselog::platform;
pub use fuelwiselog::ui;
pub use fuelwiselog::util;

use clap::Parser;
use std::path::PathBuf;

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI and Segoe UI Emoji from the system font
/// directory so vehicle badges and fuel-pump symbols render instead of
/// square glyphs. The built-in egui fonts are kept as final fallbacks.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; vehicle symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }
            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// FuelWiseLog - fuel consumption and running-cost logbook.
///
/// Record fill-ups for each vehicle and track litres per 100 km and
/// cost per km over time.
#[derive(Parser, Debug)]
#[command(name = "FuelWiseLog", version, about)]
struct Cli {
    /// Database file to open instead of the platform default.
    #[arg(long = "database", value_name = "PATH")]
    database: Option<PathBuf>,

    /// Theme for this session: light, dark or system.
    #[arg(short = 't', long = "theme")]
    theme: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging starts so its level can apply; its
    // warnings are logged once the subscriber exists.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, mut warnings) =
        platform::config::load_config(&platform_paths.config_file(), &platform_paths.data_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "FuelWiseLog starting"
    );
    for w in &warnings {
        tracing::warn!("{}", w);
    }

    // Database: CLI override > config.toml > platform default
    let db_path = cli
        .database
        .clone()
        .or_else(|| config.database.clone())
        .unwrap_or_else(|| platform_paths.default_database());

    let store = match platform::store::FuelStore::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Cannot open fuel database");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Theme: --theme > saved View-menu choice > config.toml. Only the
    // View-menu choice is ever written back to prefs.json.
    let prefs_path = platform_paths.prefs_file();
    let prefs = app::prefs::load(&prefs_path).unwrap_or_default();
    let has_saved_theme = prefs.theme.is_some();

    let mut state = match app::state::AppState::new(
        store,
        prefs,
        Some(prefs_path),
        config.currency.clone(),
        cli.debug,
    ) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Cannot load fuel data");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if !has_saved_theme {
        state.override_theme(config.theme);
    }
    if let Some(ref raw) = cli.theme {
        match core::model::ThemeMode::parse(raw) {
            Some(mode) => state.override_theme(mode),
            None => {
                let msg = format!("Unknown theme '{raw}'; expected light, dark or system.");
                tracing::warn!("{}", msg);
                warnings.push(msg);
            }
        }
    }
    state.warnings = warnings;
    state.status_message = format!(
        "{} \u{00b7} {}",
        core::fuel_log::vehicle_count_label(state.vehicles.len()),
        core::fuel_log::count_label(state.records.len())
    );

    tracing::info!(database = %db_path.display(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            ui::theme::apply_font_size(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::FuelWiseApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch FuelWiseLog GUI: {e}");
        std::process::exit(1);
    }
}
