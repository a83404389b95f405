//! Unified error types for the user service.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::metrics;
use crate::models::{ApiResponse, Message};

/// Process-level error: anything that stops a command from running.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Seed file could not be used.
    #[error("seed error: {0}")]
    Seed(#[from] SeedError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered a probe with a non-success status.
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// Status received.
        status: reqwest::StatusCode,
        /// URL probed.
        url: String,
    },

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Prometheus exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Seed file errors.
#[derive(Error, Debug)]
pub enum SeedError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Seed file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// File is not a JSON array of users.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Seed file path.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Two records share an id.
    #[error("duplicate user id {0}")]
    DuplicateId(u64),

    /// A record holds the largest id, leaving none for new users.
    #[error("user id {0} leaves no room for new ids")]
    IdOverflow(u64),
}

/// Request-level error, rendered as an envelope with `data: null`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body failed to deserialize (400).
    #[error("{msg}: {0}", msg = Message::InvalidBody)]
    BadRequest(String),

    /// No record with the requested id (404).
    #[error("{msg}", msg = Message::UserNotFound)]
    NotFound,

    /// The id counter cannot advance (500).
    #[error("{msg}", msg = Message::IdsExhausted)]
    IdsExhausted,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BadRequest(_) => metrics::inc_bad_requests(),
            ApiError::NotFound => metrics::inc_users_not_found(),
            ApiError::IdsExhausted => {}
        }
        ApiResponse::failure(self.status(), self.to_string()).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Result type for request handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
