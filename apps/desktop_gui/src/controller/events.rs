//! Backend-to-UI events and the page they belong to.

use client_core::RotationOverview;
use shared::domain::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Rotation,
    Users,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rotation => "Rotation",
            Self::Users => "Users",
        }
    }
}

/// Load results carry the generation they were requested under so the
/// reducer can drop responses that a newer load has superseded.
#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    RotationLoaded {
        generation: u64,
        result: Result<RotationOverview, String>,
    },
    RotationAdvanced {
        message: String,
    },
    RotationActionFailed {
        generation: u64,
        message: String,
    },
    UsersLoaded {
        generation: u64,
        result: Result<Vec<User>, String>,
    },
    UserAdded(User),
    UserDeleted(UserId),
    UserActiveChanged {
        user_id: UserId,
        active: bool,
    },
    UserActionFailed {
        mount_id: u64,
        message: String,
    },
}

impl UiEvent {
    pub fn page(&self) -> Option<Page> {
        match self {
            Self::Info(_) => None,
            Self::RotationLoaded { .. }
            | Self::RotationAdvanced { .. }
            | Self::RotationActionFailed { .. } => Some(Page::Rotation),
            Self::UsersLoaded { .. }
            | Self::UserAdded(_)
            | Self::UserDeleted(_)
            | Self::UserActiveChanged { .. }
            | Self::UserActionFailed { .. } => Some(Page::Users),
        }
    }
}
