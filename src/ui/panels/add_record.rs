// FuelWiseLog - ui/panels/add_record.rs
//
// Add-record screen: vehicle, date, volume, cost and odometer reading.
// Every rejected field shows its message beneath the input.

use crate::app::state::{AppState, Screen};
use crate::core::format;
use crate::ui::theme;
use crate::util::error::{Field, ValidationError};
use chrono::NaiveDate;

fn field_error(ui: &mut egui::Ui, error: Option<&ValidationError>, field: Field) {
    if let Some(msg) = error.and_then(|e| e.message_for(field)) {
        ui.colored_label(theme::ERROR_TEXT, msg);
    }
}

fn text_field(ui: &mut egui::Ui, value: &mut String, hint: &str) {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(theme::FORM_FIELD_WIDTH),
    );
}

/// Render the add-record form into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, today: NaiveDate) {
    ui.heading("Add Fuel Record");
    ui.add_space(theme::CARD_SPACING);

    let error = state.record_form.error.clone();
    let mut picked = state.record_form.input.vehicle_id;
    let selected_text = picked
        .and_then(|id| state.vehicle(id))
        .map(|v| format!("{} {}", v.symbol(), v.label()))
        .unwrap_or_else(|| "Select a vehicle".to_string());

    egui::Grid::new("record_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .min_col_width(theme::FORM_LABEL_WIDTH)
        .show(ui, |ui| {
            ui.label("Vehicle");
            ui.vertical(|ui| {
                egui::ComboBox::from_id_salt("record_form_vehicle")
                    .selected_text(selected_text)
                    .width(theme::FORM_FIELD_WIDTH)
                    .show_ui(ui, |ui| {
                        for v in &state.vehicles {
                            ui.selectable_value(
                                &mut picked,
                                Some(v.id),
                                format!("{} {}", v.symbol(), v.label()),
                            );
                        }
                    });
                field_error(ui, error.as_ref(), Field::Vehicle);
            });
            ui.end_row();

            let input = &mut state.record_form.input;

            ui.label("Date");
            ui.vertical(|ui| {
                text_field(ui, &mut input.date, "YYYY-MM-DD");
                field_error(ui, error.as_ref(), Field::Date);
            });
            ui.end_row();

            ui.label(Field::Litres.label());
            ui.vertical(|ui| {
                text_field(ui, &mut input.litres, "e.g. 32.50");
                field_error(ui, error.as_ref(), Field::Litres);
            });
            ui.end_row();

            ui.label(format!("Cost ({})", state.currency));
            ui.vertical(|ui| {
                text_field(ui, &mut input.cost, "e.g. 66.30");
                field_error(ui, error.as_ref(), Field::Cost);
            });
            ui.end_row();

            ui.label(Field::Mileage.label());
            ui.vertical(|ui| {
                text_field(ui, &mut input.mileage, "Odometer reading");
                ui.label(
                    egui::RichText::new(format::last_recorded(state.record_form.last_mileage))
                        .small()
                        .weak(),
                );
                field_error(ui, error.as_ref(), Field::Mileage);
            });
            ui.end_row();
        });

    if picked != state.record_form.input.vehicle_id {
        if let Some(id) = picked {
            if let Err(e) = state.set_record_vehicle(id) {
                state.report_error(e);
            }
        }
    }

    ui.add_space(theme::CARD_SPACING);
    ui.horizontal(|ui| {
        if ui.button("\u{1f4be} Save").clicked() {
            if let Err(e) = state.submit_record_form(today) {
                state.report_error(e);
            }
        }
        if ui.button("Cancel").clicked() {
            state.screen = Screen::Home;
        }
    });
}
