// FuelWiseLog - ui/panels/home.rs
//
// Home screen: selected vehicle card, efficiency summary, and the most
// recent fill-ups.

use crate::app::state::{AppState, Screen};
use crate::core::format;
use crate::core::fuel_log::count_label;
use crate::ui::theme;
use crate::util::constants::DATE_FORMAT;
use chrono::NaiveDate;

/// Render the home screen into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, today: NaiveDate) {
    ui.heading("Dashboard");
    ui.add_space(theme::CARD_SPACING);

    if state.vehicles.is_empty() {
        ui.label("No vehicles yet.");
        if ui.button("\u{2795} Add your first vehicle").clicked() {
            state.screen = Screen::Vehicles;
            state.open_new_vehicle();
        }
        return;
    }

    // Vehicle picker
    let mut picked = state.selected_vehicle_id;
    let selected_text = state
        .selected_vehicle()
        .map(|v| format!("{} {}", v.symbol(), v.label()))
        .unwrap_or_default();
    ui.horizontal(|ui| {
        ui.label("Vehicle:");
        egui::ComboBox::from_id_salt("home_vehicle")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for v in &state.vehicles {
                    ui.selectable_value(&mut picked, Some(v.id), format!("{} {}", v.symbol(), v.label()));
                }
            });
    });
    if picked != state.selected_vehicle_id {
        if let Some(id) = picked {
            state.select_vehicle(id);
        }
    }

    ui.add_space(theme::CARD_SPACING);
    vehicle_card(ui, state);
    ui.add_space(theme::CARD_SPACING);

    let can_add = state.screen_enabled(Screen::AddRecord);
    let can_view_log = state.screen_enabled(Screen::FuelLog);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(can_add, egui::Button::new("\u{26fd} Add Record"))
            .clicked()
        {
            if let Err(e) = state.open_add_record(today) {
                state.report_error(e);
            }
        }
        if ui
            .add_enabled(can_view_log, egui::Button::new("\u{1f4cb} Fuel Log"))
            .clicked()
        {
            state.screen = Screen::FuelLog;
        }
    });

    ui.add_space(theme::CARD_SPACING);
    ui.separator();
    recent_history(ui, state);
}

fn vehicle_card(ui: &mut egui::Ui, state: &AppState) {
    let Some(vehicle) = state.selected_vehicle() else {
        return;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.colored_label(
                theme::vehicle_colour(&vehicle.colour_hex),
                egui::RichText::new("\u{25cf}").size(22.0),
            );
            ui.label(egui::RichText::new(vehicle.symbol()).size(22.0));
            ui.vertical(|ui| {
                ui.strong(&vehicle.name);
                let mut detail = vehicle.vehicle_type.clone();
                if let Some(ref plate) = vehicle.plate_number {
                    detail.push_str(" \u{00b7} ");
                    detail.push_str(plate);
                }
                ui.label(egui::RichText::new(detail).weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(count_label(state.selected_record_count()));
            });
        });

        ui.add_space(6.0);

        match state.home_summary() {
            Some(summary) => {
                egui::Grid::new("home_summary")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Total distance:");
                        ui.strong(format::km(summary.total_distance_km));
                        ui.end_row();

                        ui.label("Total cost:");
                        ui.strong(format::money(&state.currency, summary.total_cost));
                        ui.end_row();

                        ui.label("Average cost:");
                        ui.strong(format::cost_per_km(&state.currency, summary.avg_cost_per_km));
                        ui.end_row();

                        ui.label("Average consumption:");
                        ui.strong(format::consumption(summary.avg_litres_per_100km));
                        ui.end_row();
                    });
            }
            None => {
                ui.label(
                    egui::RichText::new("Add at least two fill-ups to see efficiency.").weak(),
                );
            }
        }
    });
}

fn recent_history(ui: &mut egui::Ui, state: &AppState) {
    ui.strong("Recent fill-ups");
    let history = state.recent_history();
    if history.is_empty() {
        ui.label(egui::RichText::new("No fill-ups recorded.").weak());
        return;
    }

    egui::Grid::new("home_history")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Date");
            ui.strong("Volume");
            ui.strong("Cost");
            ui.strong("Mileage");
            ui.strong("Efficiency");
            ui.end_row();

            for item in &history {
                let r = &item.record;
                ui.label(r.date.format(DATE_FORMAT).to_string());
                ui.label(format::litres(r.volume_litres));
                ui.label(format::money(&state.currency, r.cost));
                ui.label(format::km(r.mileage_km));
                match item.metrics {
                    Some(m) => {
                        ui.colored_label(
                            theme::GOOD_TEXT,
                            format!(
                                "{} \u{00b7} {}",
                                format::consumption(m.litres_per_100km),
                                format::cost_per_km(&state.currency, m.cost_per_km)
                            ),
                        );
                    }
                    None => {
                        ui.label("\u{2014}");
                    }
                }
                ui.end_row();
            }
        });
}
