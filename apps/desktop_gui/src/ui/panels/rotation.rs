use eframe::egui;

use crate::controller::reducer::{PageStatus, RotationPageState};
use crate::ui::{theme::Theme, widgets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationIntent {
    Rotate,
    Reload,
}

pub fn show(ui: &mut egui::Ui, theme: &Theme, state: &RotationPageState) -> Option<RotationIntent> {
    match state.view.status() {
        PageStatus::Loading => {
            widgets::centered_spinner(ui);
            None
        }
        PageStatus::Failed(message) => {
            widgets::blocking_error(ui, theme, message).then_some(RotationIntent::Reload)
        }
        PageStatus::Ready => show_ready(ui, theme, state),
    }
}

fn show_ready(
    ui: &mut egui::Ui,
    theme: &Theme,
    state: &RotationPageState,
) -> Option<RotationIntent> {
    let mut intent = None;
    theme.paper_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("Rotation Management")
                    .color(theme.primary)
                    .size(28.0),
            );
            ui.add_space(24.0);
            ui.label(
                egui::RichText::new("On duty now")
                    .color(theme.text_secondary)
                    .size(20.0),
            );
            ui.label(
                egui::RichText::new(state.current_user_label())
                    .color(theme.text_primary)
                    .size(28.0)
                    .strong(),
            );
            ui.add_space(12.0);
            if ui.add(theme.primary_button("Rotate to next person")).clicked() {
                intent = Some(RotationIntent::Rotate);
            }
            ui.add_space(32.0);
            ui.label(
                egui::RichText::new("This month's rotation")
                    .color(theme.text_secondary)
                    .size(20.0),
            );
        });
        ui.add_space(8.0);

        for week in &state.forecast {
            theme.row_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(week.week_label()).color(theme.text_primary));
                ui.label(egui::RichText::new(&week.user).color(theme.text_secondary));
            });
            ui.add_space(8.0);
        }
    });
    intent
}
