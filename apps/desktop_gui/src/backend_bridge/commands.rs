//! Backend commands queued from UI to backend worker.

use shared::{domain::UserId, protocol::NewUser};

#[derive(Debug)]
pub enum BackendCommand {
    LoadRotation {
        generation: u64,
    },
    /// Advance the rotation, then reload the whole rotation page.
    RotateNext {
        generation: u64,
    },
    LoadUsers {
        generation: u64,
    },
    /// User mutations carry the mount they were issued from so a failure
    /// arriving after a remount does not land on the fresh page.
    AddUser {
        mount_id: u64,
        user: NewUser,
    },
    DeleteUser {
        mount_id: u64,
        user_id: UserId,
    },
    ToggleUserActive {
        mount_id: u64,
        user_id: UserId,
        current_active: bool,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadRotation { .. } => "load_rotation",
            Self::RotateNext { .. } => "rotate_next",
            Self::LoadUsers { .. } => "load_users",
            Self::AddUser { .. } => "add_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::ToggleUserActive { .. } => "toggle_user_active",
        }
    }
}
