//! HTTP API module: user CRUD, health check, CORS and frontend hosting.

pub mod cors;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{api_router, create_router, frontend_router};
