//! In-memory user directory service.
//!
//! A small HTTP service exposing CRUD over a list of users, a health check,
//! and hosting for the prebuilt companion frontend. Every JSON response is
//! wrapped in the same envelope:
//!
//! ```text
//! { "code": 200, "message": "users retrieved", "data": [ ... ] }
//! { "code": 404, "message": "user not found",  "data": null    }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`models`]: User record and response envelope
//! - [`store`]: Ordered in-memory user store
//! - [`api`]: HTTP handlers, router, CORS policy
//! - [`seed`]: Seed files and generated demo data
//! - [`client`]: HTTP client used by the CLI probes
//! - [`metrics`]: Prometheus counters
//! - [`openapi`]: OpenAPI document
//! - [`utils`]: Utility functions

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod seed;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
pub use store::UserStore;
