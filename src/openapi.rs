//! OpenAPI description of the JSON API.

use utoipa::OpenApi;

use crate::api::handlers;
use crate::models::{DeletedUser, HealthStatus, User, UserPayload};

/// OpenAPI document for the `/api` endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "User Service", description = "In-memory user directory"),
    paths(
        handlers::health,
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(User, UserPayload, HealthStatus, DeletedUser)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "users", description = "User CRUD")
    )
)]
pub struct ApiDoc;

/// Render the document as pretty-printed JSON.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
