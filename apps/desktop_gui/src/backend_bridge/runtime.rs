//! Backend worker: owns the tokio runtime and the API client, turns queued
//! commands into API calls and reports outcomes as UI events. Each command
//! runs as its own task, so a slow request never holds up later ones.

use std::{sync::Arc, thread};

use chrono::NaiveDate;
use client_core::{
    advance_rotation, describe_error, load_rotation_overview, local_today, toggle_user_active,
    RotaApi,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(api: Arc<dyn RotaApi>, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
        while let Ok(cmd) = cmd_rx.recv() {
            let api = Arc::clone(&api);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                handle_command(api.as_ref(), cmd, local_today(), &ui_tx).await;
            });
        }
        tracing::info!("ui command queue closed; backend worker exiting");
    });
}

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.try_send(event).is_err() {
        tracing::warn!("backend->ui event queue unavailable; dropping event");
    }
}

pub async fn handle_command<A>(
    api: &A,
    cmd: BackendCommand,
    today: NaiveDate,
    ui_tx: &Sender<UiEvent>,
) where
    A: RotaApi + ?Sized,
{
    let command = cmd.name();
    match cmd {
        BackendCommand::LoadRotation { generation } => {
            reload_rotation(api, generation, today, ui_tx).await;
        }
        BackendCommand::RotateNext { generation } => match advance_rotation(api).await {
            Ok(message) => {
                tracing::info!(command, %message, "rotation advanced");
                emit(ui_tx, UiEvent::RotationAdvanced { message });
                reload_rotation(api, generation, today, ui_tx).await;
            }
            Err(err) => {
                let message = describe_error(&err);
                tracing::error!(command, "rotation update failed: {message}");
                emit(
                    ui_tx,
                    UiEvent::RotationActionFailed {
                        generation,
                        message,
                    },
                );
            }
        },
        BackendCommand::LoadUsers { generation } => {
            let result = api.list_users().await.map_err(|err| {
                let message = describe_error(&err);
                tracing::error!(command, "user fetch failed: {message}");
                message
            });
            emit(ui_tx, UiEvent::UsersLoaded { generation, result });
        }
        BackendCommand::AddUser { mount_id, user } => match api.create_user(user).await {
            Ok(user) => {
                tracing::info!(command, user_id = %user.id, "user added");
                emit(ui_tx, UiEvent::UserAdded(user));
            }
            Err(err) => user_action_failed(command, mount_id, err, ui_tx),
        },
        BackendCommand::DeleteUser { mount_id, user_id } => match api.delete_user(user_id).await {
            Ok(()) => {
                tracing::info!(command, %user_id, "user deleted");
                emit(ui_tx, UiEvent::UserDeleted(user_id));
            }
            Err(err) => user_action_failed(command, mount_id, err, ui_tx),
        },
        BackendCommand::ToggleUserActive {
            mount_id,
            user_id,
            current_active,
        } => match toggle_user_active(api, user_id, current_active).await {
            Ok(active) => {
                tracing::info!(command, %user_id, active, "user status updated");
                emit(ui_tx, UiEvent::UserActiveChanged { user_id, active });
            }
            Err(err) => user_action_failed(command, mount_id, err, ui_tx),
        },
    }
}

async fn reload_rotation<A>(
    api: &A,
    generation: u64,
    today: NaiveDate,
    ui_tx: &Sender<UiEvent>,
) where
    A: RotaApi + ?Sized,
{
    let result = load_rotation_overview(api, today).await.map_err(|err| {
        let message = describe_error(&err);
        tracing::error!("rotation fetch failed: {message}");
        message
    });
    emit(ui_tx, UiEvent::RotationLoaded { generation, result });
}

fn user_action_failed(
    command: &'static str,
    mount_id: u64,
    err: client_core::ClientError,
    ui_tx: &Sender<UiEvent>,
) {
    let message = describe_error(&err);
    tracing::error!(command, "user action failed: {message}");
    emit(ui_tx, UiEvent::UserActionFailed { mount_id, message });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{ApiAction, ClientError};
    use crossbeam_channel::{bounded, Receiver};
    use reqwest::StatusCode;
    use shared::{
        domain::{MonthlyRotationEntry, Rotation, RotationId, User, UserId},
        protocol::{ManualRotateResponse, NewUser},
    };
    use std::{
        sync::Mutex,
        time::{Duration, Instant},
    };

    #[derive(Default)]
    struct FakeApi {
        rotate_message: Option<String>,
        fail_create: bool,
        stall_create: bool,
        toggles: Mutex<Vec<(UserId, bool)>>,
    }

    #[async_trait]
    impl RotaApi for FakeApi {
        async fn current_rotation(&self) -> Result<Rotation, ClientError> {
            Ok(Rotation {
                id: RotationId(1),
                current_user: None,
            })
        }

        async fn monthly_list(&self) -> Result<Vec<MonthlyRotationEntry>, ClientError> {
            Ok(vec![MonthlyRotationEntry {
                week: 1,
                user: "Taro".to_string(),
            }])
        }

        async fn manual_rotate(&self) -> Result<ManualRotateResponse, ClientError> {
            Ok(ManualRotateResponse {
                message: self.rotate_message.clone(),
            })
        }

        async fn list_users(&self) -> Result<Vec<User>, ClientError> {
            Err(ClientError::status(ApiAction::ListUsers, StatusCode::BAD_GATEWAY))
        }

        async fn create_user(&self, user: NewUser) -> Result<User, ClientError> {
            if self.stall_create {
                std::future::pending::<()>().await;
            }
            if self.fail_create {
                return Err(ClientError::status(
                    ApiAction::CreateUser,
                    StatusCode::UNPROCESSABLE_ENTITY,
                ));
            }
            Ok(User {
                id: UserId(10),
                name: user.name,
                email: user.email,
                active: user.active,
            })
        }

        async fn delete_user(&self, _user_id: UserId) -> Result<(), ClientError> {
            Ok(())
        }

        async fn set_user_active(&self, user_id: UserId, active: bool) -> Result<(), ClientError> {
            self.toggles.lock().expect("toggles").push((user_id, active));
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("date")
    }

    fn drain(rx: &Receiver<UiEvent>) -> Vec<UiEvent> {
        rx.try_iter().collect()
    }

    #[tokio::test]
    async fn rotate_reports_message_then_reloads_under_same_generation() {
        let api = FakeApi {
            rotate_message: Some("Updated".to_string()),
            ..FakeApi::default()
        };
        let (tx, rx) = bounded(16);

        handle_command(&api, BackendCommand::RotateNext { generation: 7 }, today(), &tx).await;

        let events = drain(&rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            UiEvent::RotationAdvanced { message } if message == "Updated"
        ));
        match &events[1] {
            UiEvent::RotationLoaded {
                generation,
                result: Ok(overview),
            } => {
                assert_eq!(*generation, 7);
                assert_eq!(overview.forecast[0].start_date, today());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_user_fetch_carries_status_text() {
        let api = FakeApi::default();
        let (tx, rx) = bounded(16);

        handle_command(&api, BackendCommand::LoadUsers { generation: 2 }, today(), &tx).await;

        match drain(&rx).as_slice() {
            [UiEvent::UsersLoaded {
                generation: 2,
                result: Err(message),
            }] => assert_eq!(message, "failed to fetch users: Bad Gateway"),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_add_is_reported_as_user_action_failure() {
        let api = FakeApi {
            fail_create: true,
            ..FakeApi::default()
        };
        let (tx, rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::AddUser {
                mount_id: 3,
                user: NewUser::active("Hanako", "h@x.com"),
            },
            today(),
            &tx,
        )
        .await;

        assert!(matches!(
            drain(&rx).as_slice(),
            [UiEvent::UserActionFailed { mount_id: 3, message }]
                if message.contains("Unprocessable Entity")
        ));
    }

    #[tokio::test]
    async fn toggle_sends_negation_and_reports_new_state() {
        let api = FakeApi::default();
        let (tx, rx) = bounded(16);

        handle_command(
            &api,
            BackendCommand::ToggleUserActive {
                mount_id: 1,
                user_id: UserId(5),
                current_active: true,
            },
            today(),
            &tx,
        )
        .await;

        assert_eq!(
            api.toggles.lock().expect("toggles").as_slice(),
            [(UserId(5), false)]
        );
        assert!(matches!(
            drain(&rx).as_slice(),
            [UiEvent::UserActiveChanged {
                user_id: UserId(5),
                active: false
            }]
        ));
    }

    #[test]
    fn stalled_add_does_not_hold_up_a_later_delete() {
        let api: Arc<dyn RotaApi> = Arc::new(FakeApi {
            stall_create: true,
            ..FakeApi::default()
        });
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(64);
        launch(api, cmd_rx, ui_tx);

        cmd_tx
            .send(BackendCommand::AddUser {
                mount_id: 1,
                user: NewUser::active("Hanako", "h@x.com"),
            })
            .expect("queue add");
        cmd_tx
            .send(BackendCommand::DeleteUser {
                mount_id: 1,
                user_id: UserId(9),
            })
            .expect("queue delete");

        let deadline = Instant::now() + Duration::from_secs(3);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match ui_rx.recv_timeout(remaining) {
                Ok(UiEvent::UserDeleted(user_id)) => {
                    assert_eq!(user_id, UserId(9));
                    break;
                }
                Ok(UiEvent::Info(_)) => continue,
                Ok(other) => panic!("unexpected event: {other:?}"),
                Err(err) => panic!("delete did not complete while add was pending: {err}"),
            }
        }
    }
}
