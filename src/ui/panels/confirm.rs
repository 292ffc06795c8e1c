// FuelWiseLog - ui/panels/confirm.rs
//
// Delete confirmation dialog for vehicles and fuel records.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the confirmation dialog (if a deletion is pending).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(ref pending) = state.pending_delete else {
        return;
    };
    let title = pending.title();
    let message = pending.message();

    let mut confirm = false;
    let mut cancel = false;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Delete").color(theme::ERROR_TEXT))
                    .clicked()
                {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        if let Err(e) = state.confirm_delete() {
            state.report_error(e);
        }
    } else if cancel || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.cancel_delete();
    }
}
