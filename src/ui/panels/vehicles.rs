// FuelWiseLog - ui/panels/vehicles.rs
//
// Vehicle list with select/edit/delete actions, plus the add/edit dialog.

use crate::app::state::AppState;
use crate::core::fuel_log::vehicle_count_label;
use crate::ui::theme;
use crate::util::constants::{VEHICLE_COLOURS, VEHICLE_TYPES};
use crate::util::error::Field;

enum RowAction {
    Select(i64),
    Edit(i64),
    Delete(i64),
}

/// Render the vehicle list into the central panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Vehicles");
        ui.label(egui::RichText::new(vehicle_count_label(state.vehicles.len())).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{2795} Add Vehicle").clicked() {
                state.open_new_vehicle();
            }
        });
    });
    ui.add_space(theme::CARD_SPACING);

    if state.vehicles.is_empty() {
        ui.label(egui::RichText::new("No vehicles. Add a vehicle to start logging.").weak());
        return;
    }

    let mut action: Option<RowAction> = None;
    egui::Grid::new("vehicle_table")
        .num_columns(5)
        .striped(true)
        .spacing([14.0, 6.0])
        .show(ui, |ui| {
            for v in &state.vehicles {
                let selected = state.selected_vehicle_id == Some(v.id);
                ui.colored_label(theme::vehicle_colour(&v.colour_hex), "\u{25cf}");
                let title = format!("{} {}", v.symbol(), v.name);
                if selected {
                    ui.strong(title);
                } else {
                    ui.label(title);
                }
                ui.label(&v.vehicle_type);
                ui.label(v.plate_number.as_deref().unwrap_or("\u{2014}"));
                ui.horizontal(|ui| {
                    if ui.add_enabled(!selected, egui::Button::new("Select")).clicked() {
                        action = Some(RowAction::Select(v.id));
                    }
                    if ui.button("Edit").clicked() {
                        action = Some(RowAction::Edit(v.id));
                    }
                    if ui
                        .button(egui::RichText::new("Delete").color(theme::ERROR_TEXT))
                        .clicked()
                    {
                        action = Some(RowAction::Delete(v.id));
                    }
                });
                ui.end_row();
            }
        });

    match action {
        Some(RowAction::Select(id)) => state.select_vehicle(id),
        Some(RowAction::Edit(id)) => state.open_edit_vehicle(id),
        Some(RowAction::Delete(id)) => state.request_delete_vehicle(id),
        None => {}
    }
}

/// Render the add/edit vehicle dialog (if the form is open).
pub fn render_form(ctx: &egui::Context, state: &mut AppState) {
    if !state.vehicle_form.open {
        return;
    }

    let title = if state.vehicle_form.editing.is_some() {
        "Edit Vehicle"
    } else {
        "Add Vehicle"
    };

    let mut open = true;
    let mut save = false;
    let mut cancel = false;

    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let form = &mut state.vehicle_form;
            let error = form.error.clone();
            let field_error = |ui: &mut egui::Ui, field: Field| {
                if let Some(msg) = error.as_ref().and_then(|e| e.message_for(field)) {
                    ui.colored_label(theme::ERROR_TEXT, msg);
                }
            };

            egui::Grid::new("vehicle_form")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .min_col_width(theme::FORM_LABEL_WIDTH)
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.vertical(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut form.input.name)
                                .hint_text("e.g. My Honda")
                                .desired_width(theme::FORM_FIELD_WIDTH),
                        );
                        field_error(ui, Field::Name);
                    });
                    ui.end_row();

                    ui.label("Type");
                    egui::ComboBox::from_id_salt("vehicle_form_type")
                        .selected_text(form.input.vehicle_type.clone())
                        .width(theme::FORM_FIELD_WIDTH)
                        .show_ui(ui, |ui| {
                            for t in VEHICLE_TYPES {
                                ui.selectable_value(&mut form.input.vehicle_type, t.to_string(), *t);
                            }
                        });
                    ui.end_row();

                    ui.label("Plate number");
                    ui.vertical(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut form.input.plate)
                                .hint_text("Optional")
                                .desired_width(theme::FORM_FIELD_WIDTH),
                        );
                        field_error(ui, Field::Plate);
                    });
                    ui.end_row();

                    ui.label("Colour");
                    ui.horizontal_wrapped(|ui| {
                        for hex in VEHICLE_COLOURS {
                            let chosen = form.input.colour_hex.eq_ignore_ascii_case(hex);
                            let swatch = egui::RichText::new(if chosen { "\u{25c9}" } else { "\u{25cf}" })
                                .size(20.0)
                                .color(theme::vehicle_colour(hex));
                            if ui.selectable_label(chosen, swatch).clicked() {
                                form.input.colour_hex = hex.to_string();
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if save {
        if let Err(e) = state.submit_vehicle_form() {
            state.report_error(e);
        }
    } else if cancel || !open {
        state.close_vehicle_form();
    }
}
