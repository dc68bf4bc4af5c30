//! Small building blocks shared by both pages.

use eframe::egui;

use crate::ui::theme::Theme;

pub fn centered_spinner(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.4).max(24.0));
        ui.add(egui::Spinner::new().size(40.0));
    });
}

/// Full-page error view. Returns `true` when the user asked to reload.
pub fn blocking_error(ui: &mut egui::Ui, theme: &Theme, message: &str) -> bool {
    let mut reload = false;
    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() * 0.4).max(24.0));
        ui.label(egui::RichText::new(message).color(theme.error).size(16.0));
        ui.add_space(12.0);
        reload = ui.button("Reload").clicked();
    });
    reload
}

/// Bottom-anchored notification. Returns `true` when closed by the user.
pub fn snackbar(ctx: &egui::Context, theme: &Theme, id: &'static str, message: &str) -> bool {
    let mut closed = false;
    egui::Area::new(egui::Id::new(id))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme.text_primary)
                .corner_radius(egui::CornerRadius::same(theme.corner_radius))
                .inner_margin(egui::Margin::symmetric(16, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                        ui.add_space(12.0);
                        let close_label = egui::RichText::new("Close").color(theme.secondary);
                        let close = egui::Button::new(close_label).frame(false);
                        closed = ui.add(close).clicked();
                    });
                });
        });
    closed
}
