//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
};
use chrono::Local;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::models::{
    parse_user_id, ApiResponse, DeletedUser, HealthStatus, Message, User, UserPayload,
};
use crate::store::UserStore;

/// Timestamp format used by the health check.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Version reported by the health check.
const VERSION: &str = "1.0.0";

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The user store.
    pub store: Arc<RwLock<UserStore>>,
}

impl AppState {
    /// Create new app state around `store`.
    pub fn new(store: UserStore) -> Self {
        metrics::set_store_size(store.len());
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(UserStore::with_demo_users())
    }
}

/// Decode a user body; a bare `null` reads as an empty payload.
fn parse_payload(body: &[u8]) -> ApiResult<UserPayload> {
    let payload: Option<UserPayload> = serde_json::from_slice(body)?;
    Ok(payload.unwrap_or_default())
}

fn path_id(raw: &str) -> ApiResult<u64> {
    parse_user_id(raw).ok_or(ApiError::NotFound)
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = ApiResponse<HealthStatus>)),
    tag = "health"
)]
pub async fn health() -> ApiResponse<HealthStatus> {
    ApiResponse::ok(
        Message::ServiceHealthy,
        HealthStatus {
            status: "healthy".to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            version: VERSION.to_string(),
        },
    )
}

/// List every user in store order.
#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "All users", body = ApiResponse<Vec<User>>)),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResponse<Vec<User>> {
    let store = state.store.read().await;
    ApiResponse::ok(Message::UsersListed, store.list().to_vec())
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<User>),
        (status = 404, description = "No user with this id")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<User>> {
    let id = path_id(&id)?;
    let store = state.store.read().await;
    let user = store.get(id).cloned().ok_or(ApiError::NotFound)?;
    Ok(ApiResponse::ok(Message::UserFound, user))
}

/// Append a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Body is not a valid user payload"),
        (status = 500, description = "No ids left to assign")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<ApiResponse<User>> {
    let payload = parse_payload(&body)?;

    let mut store = state.store.write().await;
    let user = store
        .create(payload, Local::now().date_naive())
        .ok_or(ApiError::IdsExhausted)?;
    metrics::inc_users_created();
    metrics::set_store_size(store.len());

    info!(user_id = user.id, name = %user.name, "User created");
    Ok(ApiResponse::created(Message::UserCreated, user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "Body is not a valid user payload"),
        (status = 404, description = "No user with this id")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<ApiResponse<User>> {
    let payload = parse_payload(&body)?;
    let id = path_id(&id)?;

    let mut store = state.store.write().await;
    let user = store.update(id, payload).ok_or(ApiError::NotFound)?;
    metrics::inc_users_updated();

    info!(user_id = user.id, name = %user.name, "User updated");
    Ok(ApiResponse::ok(Message::UserUpdated, user))
}

/// Remove a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<DeletedUser>),
        (status = 404, description = "No user with this id")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<DeletedUser>> {
    let id = path_id(&id)?;

    let mut store = state.store.write().await;
    let user = store.delete(id).ok_or(ApiError::NotFound)?;
    metrics::inc_users_deleted();
    metrics::set_store_size(store.len());
    debug!(remaining = store.len(), "Store shrunk");

    info!(user_id = user.id, name = %user.name, "User deleted");
    Ok(ApiResponse::ok(
        Message::UserDeleted,
        DeletedUser {
            deleted_user_id: user.id,
            deleted_user_name: user.name,
        },
    ))
}
