// FuelWiseLog - gui.rs
//
// Top-level eframe::App implementation.
// Wires the menu bar, navigation, status bar and screens together.

use crate::app::state::{AppState, ExportFormat, Screen};
use crate::core::model::ThemeMode;
use crate::ui;
use chrono::NaiveDate;

/// The FuelWiseLog application.
pub struct FuelWiseApp {
    pub state: AppState,
    /// Theme last pushed to the egui context.
    applied_theme: Option<ThemeMode>,
}

impl FuelWiseApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            applied_theme: None,
        }
    }

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    fn export_dialog(&mut self, format: ExportFormat) {
        let ext = format.extension();
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(ext.to_uppercase(), &[ext])
            .set_file_name(format!("fuel-log.{ext}"))
            .save_file()
        else {
            return;
        };
        if let Err(e) = self.state.export_log(&dest, format) {
            self.state.report_error(e);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_rows = !self.state.records.is_empty();
                    ui.add_enabled_ui(has_rows, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export CSV...").clicked() {
                                ui.close_menu();
                                self.export_dialog(ExportFormat::Csv);
                            }
                            if ui.button("Export JSON...").clicked() {
                                ui.close_menu();
                                self.export_dialog(ExportFormat::Json);
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.label(egui::RichText::new("Theme").weak());
                    let mut theme = self.state.theme;
                    for mode in ThemeMode::all() {
                        ui.radio_value(&mut theme, *mode, mode.label());
                    }
                    if theme != self.state.theme {
                        self.state.set_theme(theme);
                        ui.close_menu();
                    }
                    if !self.state.warnings.is_empty() {
                        ui.separator();
                        if ui.button("Clear Warnings").clicked() {
                            self.state.warnings.clear();
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn nav_bar(&mut self, ctx: &egui::Context) {
        let today = Self::today();
        egui::TopBottomPanel::top("nav_bar")
            .exact_height(ui::theme::NAV_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    for screen in [Screen::Home, Screen::Vehicles, Screen::AddRecord, Screen::FuelLog] {
                        let current = self.state.screen == screen;
                        let enabled = self.state.screen_enabled(screen);
                        let label = egui::SelectableLabel::new(current, screen.title());
                        if ui.add_enabled(enabled, label).clicked() && !current {
                            match screen {
                                Screen::AddRecord => {
                                    if let Err(e) = self.state.open_add_record(today) {
                                        self.state.report_error(e);
                                    }
                                }
                                other => self.state.screen = other,
                            }
                        }
                    }
                });
            });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if !self.state.warnings.is_empty() {
                        let n = self.state.warnings.len();
                        ui.colored_label(ui::theme::ERROR_TEXT, format!("\u{26a0} {n}"))
                            .on_hover_text(self.state.warnings.join("\n"));
                    }
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });
    }
}

impl eframe::App for FuelWiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.state.theme) {
            ui::theme::apply_theme(ctx, self.state.theme);
            self.applied_theme = Some(self.state.theme);
        }

        self.menu_bar(ctx);
        self.nav_bar(ctx);
        self.status_bar(ctx);

        let today = Self::today();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("central")
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.state.screen {
                    Screen::Home => ui::panels::home::render(ui, &mut self.state, today),
                    Screen::Vehicles => ui::panels::vehicles::render(ui, &mut self.state),
                    Screen::AddRecord => ui::panels::add_record::render(ui, &mut self.state, today),
                    Screen::FuelLog => ui::panels::fuel_log::render(ui, &mut self.state),
                });
        });

        // Dialogs
        ui::panels::vehicles::render_form(ctx, &mut self.state);
        ui::panels::confirm::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_prefs();
    }
}
