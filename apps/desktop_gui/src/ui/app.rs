//! App shell: drains backend events, mounts the active page and turns page
//! intents into backend commands.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{Page, UiEvent},
    orchestration::dispatch_backend_command,
    reducer::Pages,
};
use crate::ui::{
    panels::{
        rotation::{self, RotationIntent},
        users::{self, UserIntent},
    },
    theme::Theme,
    widgets,
};

pub struct RotaDesktopApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    theme: Theme,
    api_url: String,
    status: String,
    active_page: Page,
    mounted: Option<Page>,
    pages: Pages,
}

impl RotaDesktopApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        theme: Theme,
        api_url: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            theme,
            api_url,
            status: "Starting...".to_string(),
            active_page: Page::Rotation,
            mounted: None,
            pages: Pages::default(),
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let UiEvent::Info(message) = event {
                self.status = message;
                continue;
            }
            let page = event.page().map(Page::label).unwrap_or("app");
            if !self.pages.apply(event, now) {
                tracing::warn!(page, "dropped stale backend result");
            }
        }
    }

    /// Mounting resets the page and starts its initial load.
    fn ensure_mounted(&mut self) {
        if self.mounted == Some(self.active_page) {
            return;
        }
        self.mounted = Some(self.active_page);
        tracing::debug!(page = self.active_page.label(), "mounting page");
        match self.active_page {
            Page::Rotation => {
                let generation = self.pages.rotation.mount();
                self.send_rotation(BackendCommand::LoadRotation { generation });
            }
            Page::Users => {
                let generation = self.pages.users.mount();
                self.send_users(BackendCommand::LoadUsers { generation });
            }
        }
    }

    fn send_rotation(&mut self, cmd: BackendCommand) {
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.pages.rotation.view.fail(message);
        }
    }

    fn send_users(&mut self, cmd: BackendCommand) {
        if let Err(message) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.pages.users.view.fail(message);
        }
    }

    fn handle_rotation_intent(&mut self, intent: RotationIntent) {
        match intent {
            RotationIntent::Rotate => {
                let generation = self.pages.rotation.begin_rotate();
                self.send_rotation(BackendCommand::RotateNext { generation });
            }
            RotationIntent::Reload => {
                let generation = self.pages.rotation.begin_load();
                self.send_rotation(BackendCommand::LoadRotation { generation });
            }
        }
    }

    fn handle_user_intent(&mut self, intent: UserIntent) {
        match intent {
            UserIntent::Add => {
                if let Some(user) = self.pages.users.pending_new_user() {
                    let mount_id = self.pages.users.view.mount_id();
                    self.send_users(BackendCommand::AddUser { mount_id, user });
                }
            }
            UserIntent::Delete(user_id) => {
                let mount_id = self.pages.users.view.mount_id();
                self.send_users(BackendCommand::DeleteUser { mount_id, user_id });
            }
            UserIntent::ToggleActive {
                user_id,
                current_active,
            } => {
                let mount_id = self.pages.users.view.mount_id();
                self.send_users(BackendCommand::ToggleUserActive {
                    mount_id,
                    user_id,
                    current_active,
                });
            }
            UserIntent::Reload => {
                let generation = self.pages.users.begin_load();
                self.send_users(BackendCommand::LoadUsers { generation });
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_top_bar")
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(self.theme.primary)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Duty Rotation")
                            .color(egui::Color32::WHITE)
                            .size(20.0)
                            .strong(),
                    );
                    ui.add_space(24.0);
                    for page in [Page::Rotation, Page::Users] {
                        let selected = self.active_page == page;
                        let text = egui::RichText::new(page.label()).color(if selected {
                            egui::Color32::WHITE
                        } else {
                            egui::Color32::from_white_alpha(180)
                        });
                        if ui
                            .add(egui::Button::new(text).frame(false).selected(selected))
                            .clicked()
                        {
                            self.active_page = page;
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{} | {}", self.api_url, self.status))
                                .color(egui::Color32::from_white_alpha(200))
                                .small(),
                        );
                    });
                });
            });
    }

    fn show_active_page(&mut self, ctx: &egui::Context) {
        let theme = &self.theme;
        let pages = &mut self.pages;
        let active_page = self.active_page;
        let mut rotation_intent = None;
        let mut user_intent = None;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme.background)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_max_width(720.0_f32.min(ui.available_width()));
                        match active_page {
                            Page::Rotation => {
                                rotation_intent = rotation::show(ui, theme, &pages.rotation);
                            }
                            Page::Users => {
                                user_intent = users::show(ui, theme, &mut pages.users);
                            }
                        }
                    });
            });

        if let Some(intent) = rotation_intent {
            self.handle_rotation_intent(intent);
        }
        if let Some(intent) = user_intent {
            self.handle_user_intent(intent);
        }
    }

    fn show_snackbar(&mut self, ctx: &egui::Context, now: Instant) {
        let snackbar = match self.active_page {
            Page::Rotation => &mut self.pages.rotation.snackbar,
            Page::Users => &mut self.pages.users.snackbar,
        };
        let Some(message) = snackbar.visible_message(now).map(str::to_owned) else {
            return;
        };
        if widgets::snackbar(ctx, &self.theme, "page_snackbar", &message) {
            snackbar.dismiss();
        }
    }
}

impl eframe::App for RotaDesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events(now);
        self.pages.expire_snackbars(now);

        self.show_top_bar(ctx);
        self.ensure_mounted();
        self.show_active_page(ctx);
        self.show_snackbar(ctx, now);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::reducer::PageStatus;
    use crossbeam_channel::bounded;
    use shared::domain::UserId;

    fn app() -> (RotaDesktopApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = RotaDesktopApp::new(
            cmd_tx,
            ui_rx,
            Theme::standard(),
            "http://127.0.0.1:3000".to_string(),
        );
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn mounting_rotation_page_requests_initial_load_once() {
        let (mut app, cmd_rx, _ui_tx) = app();

        app.ensure_mounted();
        app.ensure_mounted();

        let commands: Vec<_> = cmd_rx.try_iter().collect();
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], BackendCommand::LoadRotation { .. }));
        assert_eq!(app.pages.rotation.view.status(), PageStatus::Loading);
    }

    #[test]
    fn switching_pages_remounts_and_drops_late_results() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.ensure_mounted();
        let first = match cmd_rx.try_recv() {
            Ok(BackendCommand::LoadRotation { generation }) => generation,
            other => panic!("unexpected command: {other:?}"),
        };

        app.active_page = Page::Users;
        app.ensure_mounted();
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::LoadUsers { .. })
        ));

        app.active_page = Page::Rotation;
        app.ensure_mounted();
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::LoadRotation { generation }) if generation > first
        ));

        ui_tx
            .send(UiEvent::RotationLoaded {
                generation: first,
                result: Err("late".to_string()),
            })
            .expect("send");
        app.process_ui_events(Instant::now());
        assert_eq!(app.pages.rotation.view.status(), PageStatus::Loading);
    }

    #[test]
    fn add_with_empty_inputs_sends_nothing() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.pages.users.name_input = "Taro".to_string();

        app.handle_user_intent(UserIntent::Add);

        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn toggle_intent_forwards_current_state() {
        let (mut app, cmd_rx, _ui_tx) = app();

        app.handle_user_intent(UserIntent::ToggleActive {
            user_id: UserId(4),
            current_active: false,
        });

        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::ToggleUserActive {
                user_id: UserId(4),
                current_active: false,
                ..
            })
        ));
    }

    #[test]
    fn dispatch_failure_surfaces_as_page_error() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let (_ui_tx, ui_rx) = bounded(1);
        drop(cmd_rx);
        let mut app = RotaDesktopApp::new(cmd_tx, ui_rx, Theme::standard(), String::new());

        app.handle_rotation_intent(RotationIntent::Reload);

        assert!(matches!(
            app.pages.rotation.view.status(),
            PageStatus::Failed(message) if message.contains("disconnected")
        ));
    }

    #[test]
    fn info_events_update_status_line() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Info("Backend worker ready".to_string()))
            .expect("send");

        app.process_ui_events(Instant::now());

        assert_eq!(app.status, "Backend worker ready");
    }
}
