use async_trait::async_trait;
use chrono::NaiveDate;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{MonthlyRotationEntry, Rotation, RotationId, User, UserId},
    protocol::{
        CreateUserRequest, ManualRotateResponse, MonthlyListResponse, NewUser, UpdateUserRequest,
        UserPatch,
    },
};
use tracing::{debug, warn};

pub mod config;
pub mod error;
pub mod schedule;

pub use config::{load_settings, Settings};
pub use error::{describe_error, ApiAction, ClientError, UNKNOWN_ERROR_MESSAGE};
pub use schedule::{forecast_weeks, local_today, week_start, ForecastWeek};

pub const DEFAULT_ROTATE_MESSAGE: &str = "Rotated to the next person on duty.";

/// Remote operations the admin pages depend on.
#[async_trait]
pub trait RotaApi: Send + Sync {
    async fn current_rotation(&self) -> Result<Rotation, ClientError>;
    async fn monthly_list(&self) -> Result<Vec<MonthlyRotationEntry>, ClientError>;
    async fn manual_rotate(&self) -> Result<ManualRotateResponse, ClientError>;
    async fn list_users(&self) -> Result<Vec<User>, ClientError>;
    async fn create_user(&self, user: NewUser) -> Result<User, ClientError>;
    async fn delete_user(&self, user_id: UserId) -> Result<(), ClientError>;
    async fn set_user_active(&self, user_id: UserId, active: bool) -> Result<(), ClientError>;
}

pub struct HttpRotaClient {
    http: Client,
    base_url: String,
    rotation_id: RotationId,
}

impl HttpRotaClient {
    pub fn new(base_url: &str, rotation_id: RotationId) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        url::Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self {
            http: Client::new(),
            base_url: trimmed.to_string(),
            rotation_id,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.api_url, settings.rotation_id)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rotation_url(&self, suffix: &str) -> String {
        format!("{}/rotations/{}{suffix}", self.base_url, self.rotation_id)
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }
}

async fn send_checked(action: ApiAction, request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Transport { action, source })?;
    let status = response.status();
    debug!(%action, %status, url = %response.url(), "api response");
    if !status.is_success() {
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|reason| std::str::from_utf8(reason.as_bytes()).ok());
        warn!(%action, %status, reason, "api returned a failure status");
        return Err(ClientError::status_with_reason(action, status, reason));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(
    action: ApiAction,
    response: Response,
) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { action, source })
}

#[async_trait]
impl RotaApi for HttpRotaClient {
    async fn current_rotation(&self) -> Result<Rotation, ClientError> {
        let action = ApiAction::FetchRotation;
        let response = send_checked(action, self.http.get(self.rotation_url(""))).await?;
        decode(action, response).await
    }

    async fn monthly_list(&self) -> Result<Vec<MonthlyRotationEntry>, ClientError> {
        let action = ApiAction::FetchMonthlyList;
        let response =
            send_checked(action, self.http.get(self.rotation_url("/monthly_list"))).await?;
        let body: MonthlyListResponse = decode(action, response).await?;
        Ok(body.monthly_rotation)
    }

    async fn manual_rotate(&self) -> Result<ManualRotateResponse, ClientError> {
        let action = ApiAction::ManualRotate;
        let response =
            send_checked(action, self.http.post(self.rotation_url("/manual_rotate"))).await?;
        decode(action, response).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let action = ApiAction::ListUsers;
        let response =
            send_checked(action, self.http.get(format!("{}/users", self.base_url))).await?;
        decode(action, response).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User, ClientError> {
        let action = ApiAction::CreateUser;
        let response = send_checked(
            action,
            self.http
                .post(format!("{}/users", self.base_url))
                .json(&CreateUserRequest { user }),
        )
        .await?;
        decode(action, response).await
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), ClientError> {
        send_checked(ApiAction::DeleteUser, self.http.delete(self.user_url(user_id))).await?;
        Ok(())
    }

    async fn set_user_active(&self, user_id: UserId, active: bool) -> Result<(), ClientError> {
        send_checked(
            ApiAction::UpdateUser,
            self.http.put(self.user_url(user_id)).json(&UpdateUserRequest {
                user: UserPatch {
                    active: Some(active),
                },
            }),
        )
        .await?;
        Ok(())
    }
}

/// Everything the rotation page shows once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationOverview {
    pub rotation: Rotation,
    pub forecast: Vec<ForecastWeek>,
}

impl RotationOverview {
    pub fn current_user_name(&self) -> Option<&str> {
        self.rotation.current_user_name()
    }
}

/// Fetches the current rotation and then the forecast. A failed first read
/// aborts before the forecast is requested.
pub async fn load_rotation_overview<A>(
    api: &A,
    today: NaiveDate,
) -> Result<RotationOverview, ClientError>
where
    A: RotaApi + ?Sized,
{
    let rotation = api.current_rotation().await?;
    let entries = api.monthly_list().await?;
    Ok(RotationOverview {
        rotation,
        forecast: forecast_weeks(entries, today),
    })
}

/// Advances the rotation and returns the confirmation to show the user.
pub async fn advance_rotation<A>(api: &A) -> Result<String, ClientError>
where
    A: RotaApi + ?Sized,
{
    let response = api.manual_rotate().await?;
    Ok(rotate_confirmation(response))
}

pub fn rotate_confirmation(response: ManualRotateResponse) -> String {
    response
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| DEFAULT_ROTATE_MESSAGE.to_string())
}

/// Builds a create-user payload from form input, or `None` when either field
/// is empty.
pub fn new_user_from_inputs(name: &str, email: &str) -> Option<NewUser> {
    if name.is_empty() || email.is_empty() {
        return None;
    }
    Some(NewUser::active(name, email))
}

/// Flips a user's active flag and returns the value now stored.
pub async fn toggle_user_active<A>(
    api: &A,
    user_id: UserId,
    current_active: bool,
) -> Result<bool, ClientError>
where
    A: RotaApi + ?Sized,
{
    let active = !current_active;
    api.set_user_active(user_id, active).await?;
    Ok(active)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
