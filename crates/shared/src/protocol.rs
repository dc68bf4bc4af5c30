use serde::{Deserialize, Serialize};

use crate::domain::MonthlyRotationEntry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyListResponse {
    pub monthly_rotation: Vec<MonthlyRotationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualRotateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl NewUser {
    /// New users start out in the rotation.
    pub fn active(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user: NewUser,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UserPatch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_user_request_wraps_payload_under_user_key() {
        let body = CreateUserRequest {
            user: NewUser::active("Hanako", "h@x.com"),
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({"user": {"name": "Hanako", "email": "h@x.com", "active": true}})
        );
    }

    #[test]
    fn update_user_request_only_carries_set_fields() {
        let body = UpdateUserRequest {
            user: UserPatch {
                active: Some(false),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({"user": {"active": false}})
        );
    }

    #[test]
    fn manual_rotate_response_tolerates_missing_message() {
        let response: ManualRotateResponse = serde_json::from_str("{}").expect("decode");
        assert!(response.message.is_none());
    }
}
