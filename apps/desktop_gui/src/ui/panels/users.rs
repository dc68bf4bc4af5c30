use eframe::egui;
use shared::domain::UserId;

use crate::controller::reducer::{PageStatus, UserPageState};
use crate::ui::{theme::Theme, widgets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    Add,
    Delete(UserId),
    ToggleActive { user_id: UserId, current_active: bool },
    Reload,
}

pub fn show(ui: &mut egui::Ui, theme: &Theme, state: &mut UserPageState) -> Option<UserIntent> {
    match state.view.status() {
        PageStatus::Loading => {
            widgets::centered_spinner(ui);
            None
        }
        PageStatus::Failed(message) => {
            widgets::blocking_error(ui, theme, message).then_some(UserIntent::Reload)
        }
        PageStatus::Ready => show_ready(ui, theme, state),
    }
}

fn show_ready(ui: &mut egui::Ui, theme: &Theme, state: &mut UserPageState) -> Option<UserIntent> {
    let mut intent = None;
    theme.paper_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("User Management")
                    .color(theme.primary)
                    .size(28.0),
            );
        });
        ui.add_space(24.0);

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.name_input)
                    .hint_text("Name")
                    .desired_width(180.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut state.email_input)
                    .hint_text("Email address")
                    .desired_width(220.0),
            );
            if ui.add(theme.primary_button("Add user")).clicked() {
                intent = Some(UserIntent::Add);
            }
        });
        ui.add_space(16.0);

        for user in &state.users {
            theme.row_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&user.name).color(theme.text_primary));
                        ui.label(egui::RichText::new(&user.email).color(theme.text_secondary));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(egui::Button::new(
                                egui::RichText::new("Delete").color(theme.secondary),
                            ))
                            .clicked()
                        {
                            intent = Some(UserIntent::Delete(user.id));
                        }
                        // Local copy: the list only changes once the server confirms.
                        let mut active = user.active;
                        if ui.checkbox(&mut active, "Active").changed() {
                            intent = Some(UserIntent::ToggleActive {
                                user_id: user.id,
                                current_active: user.active,
                            });
                        }
                    });
                });
            });
            ui.add_space(8.0);
        }
    });
    intent
}
