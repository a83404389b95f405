//! HTTP client for probing a running user service.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{Result, ServiceError};
use crate::models::{ApiResponse, HealthStatus, User, UserPayload};

/// Thin client over the service's JSON API.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Server root, e.g. `http://localhost:8080`.
    base_url: String,
}

impl ServiceClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Server root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the health endpoint.
    ///
    /// A base URL that already points at a health endpoint is used as is.
    pub fn health_url(&self) -> String {
        if self.base_url.ends_with("/health") {
            self.base_url.clone()
        } else {
            format!("{}/api/health", self.base_url)
        }
    }

    /// URL of the user collection.
    pub fn users_url(&self) -> String {
        if self.base_url.ends_with("/api/users") {
            self.base_url.clone()
        } else {
            format!("{}/api/users", self.base_url)
        }
    }

    /// GET the health endpoint.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn health(&self) -> Result<ApiResponse<HealthStatus>> {
        let url = self.health_url();
        let response = self.http.get(&url).send().await?;
        decode(response, url).await
    }

    /// GET the user list.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn list_users(&self) -> Result<ApiResponse<Vec<User>>> {
        let url = self.users_url();
        let response = self.http.get(&url).send().await?;
        decode(response, url).await
    }

    /// POST a new user.
    #[instrument(skip(self, payload), fields(base_url = %self.base_url))]
    pub async fn create_user(&self, payload: &UserPayload) -> Result<ApiResponse<User>> {
        let url = self.users_url();
        let response = self.http.post(&url).json(payload).send().await?;
        decode(response, url).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: String) -> Result<T> {
    let status = response.status();
    debug!(%status, %url, "Response received");
    if !status.is_success() {
        return Err(ServiceError::UnexpectedStatus { status, url });
    }
    Ok(response.json().await?)
}
