// FuelWiseLog - ui/panels/fuel_log.rs
//
// Fuel log: every fill-up newest first, optionally narrowed to one vehicle,
// with an averages card and per-row delete.

use crate::app::state::AppState;
use crate::core::format;
use crate::core::fuel_log::count_label;
use crate::ui::theme;
use crate::util::constants::DATE_FORMAT;

/// Render the fuel log into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let items = state.log_items();

    ui.horizontal(|ui| {
        ui.heading("Fuel Log");
        ui.label(egui::RichText::new(count_label(items.len())).weak());
    });
    ui.add_space(theme::CARD_SPACING);

    // Vehicle filter
    let mut filter = state.log_filter;
    let filter_text = filter
        .and_then(|id| state.vehicle(id))
        .map(|v| v.label())
        .unwrap_or_else(|| "All Vehicles".to_string());
    ui.horizontal(|ui| {
        ui.label("Show:");
        egui::ComboBox::from_id_salt("log_filter")
            .selected_text(filter_text)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter, None, "All Vehicles");
                for v in &state.vehicles {
                    ui.selectable_value(&mut filter, Some(v.id), v.label());
                }
            });
    });
    if filter != state.log_filter {
        tracing::debug!(filter = ?filter, "Fuel log filter changed");
        state.log_filter = filter;
    }

    ui.add_space(theme::CARD_SPACING);
    average_card(ui, state);
    ui.add_space(theme::CARD_SPACING);

    if items.is_empty() {
        ui.label(egui::RichText::new("No fuel records yet.").weak());
        return;
    }

    let mut delete: Option<i64> = None;
    egui::Grid::new("fuel_log_table")
        .num_columns(8)
        .striped(true)
        .spacing([14.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Date");
            ui.strong("Vehicle");
            ui.strong("Volume");
            ui.strong("Cost");
            ui.strong("Mileage");
            ui.strong("L/100km");
            ui.strong("Cost/km");
            ui.label("");
            ui.end_row();

            for item in &items {
                ui.label(item.date.format(DATE_FORMAT).to_string());
                ui.horizontal(|ui| {
                    ui.colored_label(theme::vehicle_colour(&item.colour_hex), "\u{25cf}");
                    ui.label(&item.vehicle_name);
                });
                ui.label(format::litres(item.volume_litres));
                ui.label(format::money(&state.currency, item.cost));
                ui.label(format::km(item.mileage_km));
                match item.efficiency {
                    Some(m) => {
                        ui.colored_label(theme::GOOD_TEXT, format::consumption(m.litres_per_100km));
                        ui.colored_label(
                            theme::GOOD_TEXT,
                            format::cost_per_km(&state.currency, m.cost_per_km),
                        );
                    }
                    None => {
                        ui.label("\u{2014}");
                        ui.label("\u{2014}");
                    }
                }
                if ui
                    .small_button(egui::RichText::new("\u{1f5d1}").color(theme::ERROR_TEXT))
                    .on_hover_text("Delete record")
                    .clicked()
                {
                    delete = Some(item.record_id);
                }
                ui.end_row();
            }
        });

    if let Some(id) = delete {
        state.request_delete_record(id);
    }
}

fn average_card(ui: &mut egui::Ui, state: &AppState) {
    let Some((vehicle, avg)) = state.average_card() else {
        return;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(format!("{} Averages for {}", vehicle.symbol(), vehicle.name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("over {} intervals", avg.intervals))
                        .small()
                        .weak(),
                );
            });
        });
        ui.horizontal(|ui| {
            ui.strong(format::cost_per_km(&state.currency, avg.avg_cost_per_km));
            ui.separator();
            ui.strong(format::consumption(avg.avg_litres_per_100km));
        });
    });
}
