//! Per-page view state and the transitions backend events drive.

use std::time::{Duration, Instant};

use client_core::{new_user_from_inputs, ForecastWeek, RotationOverview};
use shared::{
    domain::{Rotation, User, UserId},
    protocol::NewUser,
};

use crate::controller::events::UiEvent;

pub const SNACKBAR_DURATION: Duration = Duration::from_secs(6);
pub const NO_CURRENT_USER: &str = "none";
pub const USER_ADDED_MESSAGE: &str = "User added.";
pub const USER_DELETED_MESSAGE: &str = "User deleted.";
pub const USER_STATUS_UPDATED_MESSAGE: &str = "User status updated.";

/// Transient notification that hides itself after [`SNACKBAR_DURATION`].
#[derive(Debug, Clone, Default)]
pub struct Snackbar {
    message: String,
    raised_at: Option<Instant>,
}

impl Snackbar {
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = message.into();
        self.raised_at = Some(now);
    }

    pub fn dismiss(&mut self) {
        self.raised_at = None;
    }

    pub fn expire(&mut self, now: Instant) {
        if self.visible_message(now).is_none() {
            self.raised_at = None;
        }
    }

    pub fn visible_message(&self, now: Instant) -> Option<&str> {
        let raised_at = self.raised_at?;
        (now.saturating_duration_since(raised_at) < SNACKBAR_DURATION)
            .then_some(self.message.as_str())
    }
}

/// What a page renders, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus<'a> {
    Loading,
    Failed(&'a str),
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct ViewStatus {
    loading: bool,
    error: Option<String>,
    generation: u64,
    mount_id: u64,
}

impl ViewStatus {
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn finish(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.loading = false;
        }
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn mount_id(&self) -> u64 {
        self.mount_id
    }

    pub fn status(&self) -> PageStatus<'_> {
        if self.loading {
            PageStatus::Loading
        } else if let Some(error) = self.error.as_deref() {
            PageStatus::Failed(error)
        } else {
            PageStatus::Ready
        }
    }

    /// Fresh state for a new mount. The generation keeps counting so results
    /// of the previous mount stay stale.
    fn remounted(&self) -> Self {
        Self {
            generation: self.generation,
            mount_id: self.mount_id + 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RotationPageState {
    pub view: ViewStatus,
    pub rotation: Option<Rotation>,
    pub forecast: Vec<ForecastWeek>,
    pub snackbar: Snackbar,
}

impl RotationPageState {
    pub fn mount(&mut self) -> u64 {
        *self = Self {
            view: self.view.remounted(),
            ..Self::default()
        };
        self.view.begin()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.view.begin()
    }

    /// The spinner stays up until the reload that follows the rotation lands.
    pub fn begin_rotate(&mut self) -> u64 {
        self.view.begin()
    }

    pub fn current_user_label(&self) -> &str {
        self.rotation
            .as_ref()
            .and_then(Rotation::current_user_name)
            .unwrap_or(NO_CURRENT_USER)
    }

    fn apply_loaded(&mut self, generation: u64, result: Result<RotationOverview, String>) -> bool {
        if !self.view.is_current(generation) {
            return false;
        }
        match result {
            Ok(overview) => {
                self.rotation = Some(overview.rotation);
                self.forecast = overview.forecast;
                self.view.error = None;
            }
            Err(message) => self.view.set_error(message),
        }
        self.view.finish(generation);
        true
    }

    fn apply_action_failed(&mut self, generation: u64, message: String) -> bool {
        if !self.view.is_current(generation) {
            return false;
        }
        self.view.set_error(message);
        self.view.finish(generation);
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserPageState {
    pub view: ViewStatus,
    pub users: Vec<User>,
    pub name_input: String,
    pub email_input: String,
    pub snackbar: Snackbar,
}

impl UserPageState {
    pub fn mount(&mut self) -> u64 {
        *self = Self {
            view: self.view.remounted(),
            ..Self::default()
        };
        self.view.begin()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.view.begin()
    }

    /// `None` when either input is empty; nothing should be sent then.
    pub fn pending_new_user(&self) -> Option<NewUser> {
        new_user_from_inputs(&self.name_input, &self.email_input)
    }

    fn apply_loaded(&mut self, generation: u64, result: Result<Vec<User>, String>) -> bool {
        if !self.view.is_current(generation) {
            return false;
        }
        match result {
            Ok(users) => {
                self.users = users;
                self.view.error = None;
            }
            Err(message) => self.view.set_error(message),
        }
        self.view.finish(generation);
        true
    }

    fn apply_action_failed(&mut self, mount_id: u64, message: String) -> bool {
        if self.view.mount_id != mount_id {
            return false;
        }
        self.view.set_error(message);
        true
    }

    fn apply_user_added(&mut self, user: User, now: Instant) {
        match self.users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
        self.name_input.clear();
        self.email_input.clear();
        self.snackbar.show(USER_ADDED_MESSAGE, now);
    }

    fn apply_user_deleted(&mut self, user_id: UserId, now: Instant) {
        self.users.retain(|user| user.id != user_id);
        self.snackbar.show(USER_DELETED_MESSAGE, now);
    }

    fn apply_active_changed(&mut self, user_id: UserId, active: bool, now: Instant) {
        for user in self.users.iter_mut().filter(|user| user.id == user_id) {
            user.active = active;
        }
        self.snackbar.show(USER_STATUS_UPDATED_MESSAGE, now);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pages {
    pub rotation: RotationPageState,
    pub users: UserPageState,
}

impl Pages {
    /// Applies one backend event. Returns `false` when the event belonged to a
    /// superseded load or an earlier mount and was dropped.
    pub fn apply(&mut self, event: UiEvent, now: Instant) -> bool {
        match event {
            UiEvent::Info(_) => true,
            UiEvent::RotationLoaded { generation, result } => {
                self.rotation.apply_loaded(generation, result)
            }
            UiEvent::RotationAdvanced { message } => {
                self.rotation.snackbar.show(message, now);
                true
            }
            UiEvent::RotationActionFailed {
                generation,
                message,
            } => self.rotation.apply_action_failed(generation, message),
            UiEvent::UsersLoaded { generation, result } => {
                self.users.apply_loaded(generation, result)
            }
            UiEvent::UserAdded(user) => {
                self.users.apply_user_added(user, now);
                true
            }
            UiEvent::UserDeleted(user_id) => {
                self.users.apply_user_deleted(user_id, now);
                true
            }
            UiEvent::UserActiveChanged { user_id, active } => {
                self.users.apply_active_changed(user_id, active, now);
                true
            }
            UiEvent::UserActionFailed { mount_id, message } => {
                self.users.apply_action_failed(mount_id, message)
            }
        }
    }

    pub fn expire_snackbars(&mut self, now: Instant) {
        self.rotation.snackbar.expire(now);
        self.users.snackbar.expire(now);
    }
}
