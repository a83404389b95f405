//! Response envelope and payload types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

/// Human-readable messages carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Message {
    /// Health check succeeded.
    #[strum(serialize = "service healthy")]
    ServiceHealthy,
    /// User list returned.
    #[strum(serialize = "users retrieved")]
    UsersListed,
    /// Single user returned.
    #[strum(serialize = "user retrieved")]
    UserFound,
    /// User appended to the store.
    #[strum(serialize = "user created")]
    UserCreated,
    /// User name/email replaced.
    #[strum(serialize = "user updated")]
    UserUpdated,
    /// User removed from the store.
    #[strum(serialize = "user deleted")]
    UserDeleted,
    /// No user with the requested id.
    #[strum(serialize = "user not found")]
    UserNotFound,
    /// Body could not be deserialized; detail is appended.
    #[strum(serialize = "invalid request body")]
    InvalidBody,
    /// Every id has been handed out.
    #[strum(serialize = "user ids exhausted")]
    IdsExhausted,
}

/// Uniform `{code, message, data}` envelope returned by every API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Mirrors the HTTP status code.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Payload, `null` on failure.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Build an envelope for the given status.
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// 200 envelope.
    pub fn ok(message: Message, data: T) -> Self {
        Self::new(StatusCode::OK, message.to_string(), Some(data))
    }

    /// 201 envelope.
    pub fn created(message: Message, data: T) -> Self {
        Self::new(StatusCode::CREATED, message.to_string(), Some(data))
    }

    /// HTTP status the envelope is sent with.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl ApiResponse<()> {
    /// Failure envelope with `data: null`.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Payload of a successful health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always "healthy".
    pub status: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    #[schema(example = "2024-01-01 12:00:00")]
    pub timestamp: String,
    /// Service version.
    pub version: String,
}

/// Payload of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletedUser {
    /// Id of the removed user.
    pub deleted_user_id: u64,
    /// Name of the removed user.
    pub deleted_user_name: String,
}
