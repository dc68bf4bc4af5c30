//! Failure type shared by every API call and the display conversion pages use.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// The remote operation a failure belongs to. Rendered into error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    FetchRotation,
    FetchMonthlyList,
    ManualRotate,
    ListUsers,
    CreateUser,
    DeleteUser,
    UpdateUser,
}

impl ApiAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::FetchRotation => "fetch the current rotation",
            Self::FetchMonthlyList => "fetch the monthly rotation",
            Self::ManualRotate => "advance the rotation",
            Self::ListUsers => "fetch users",
            Self::CreateUser => "add the user",
            Self::DeleteUser => "delete the user",
            Self::UpdateUser => "update the user's status",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to {action}: {status_text}")]
    Status {
        action: ApiAction,
        status: StatusCode,
        status_text: String,
    },
    #[error("failed to {action}: could not reach the API ({source})")]
    Transport {
        action: ApiAction,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to {action}: unexpected response body ({source})")]
    Decode {
        action: ApiAction,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn status(action: ApiAction, status: StatusCode) -> Self {
        Self::status_with_reason(action, status, None)
    }

    /// Prefers the reason phrase the server actually sent over the canonical one.
    pub fn status_with_reason(action: ApiAction, status: StatusCode, reason: Option<&str>) -> Self {
        let status_text = reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        Self::Status {
            action,
            status,
            status_text,
        }
    }

    pub fn action(&self) -> Option<ApiAction> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::Status { action, .. }
            | Self::Transport { action, .. }
            | Self::Decode { action, .. } => Some(*action),
        }
    }
}

/// Converts any failure into the single message a page shows.
pub fn describe_error(err: impl fmt::Display) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
