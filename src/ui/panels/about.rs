// FuelWiseLog - ui/panels/about.rs
//
// About dialog (Help > About): version plus a short summary of the open
// logbook.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::{APP_NAME, APP_VERSION};

/// Label/value pairs shown in the About grid.
pub fn about_rows(state: &AppState) -> Vec<(&'static str, String)> {
    vec![
        ("Version", APP_VERSION.to_string()),
        ("Vehicles", state.vehicles.len().to_string()),
        ("Fill-ups", state.records.len().to_string()),
        ("Currency", state.currency.clone()),
        ("Theme", state.theme.label().to_string()),
    ]
}

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut close = false;
    egui::Window::new(format!("About {APP_NAME}"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading(format!("\u{26fd} {APP_NAME}"));
            ui.label("Fuel consumption and running-cost logbook.");
            ui.add_space(theme::CARD_SPACING);

            egui::Grid::new("about_rows")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .show(ui, |ui| {
                    for (label, value) in about_rows(state) {
                        ui.label(egui::RichText::new(label).weak());
                        ui.label(value);
                        ui.end_row();
                    }
                });

            ui.add_space(theme::CARD_SPACING);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        });

    if close {
        state.show_about = false;
    }
}
