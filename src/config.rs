//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::{Result, ServiceError};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    #[strum(serialize = "text")]
    Text,
    /// One JSON object per line.
    #[strum(serialize = "json")]
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built frontend (`index.html`, `vite.svg`, `assets/`).
    #[serde(default = "default_frontend_dist")]
    pub frontend_dist: PathBuf,

    /// Origins allowed by the CORS policy (comma-separated in the environment).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    // === Data ===
    /// JSON array of users to start with instead of the demo records.
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    // === Observability ===
    /// Port for the Prometheus exporter; disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_frontend_dist() -> PathBuf {
    PathBuf::from("../frontend/dist")
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            frontend_dist: default_frontend_dist(),
            cors_origins: default_cors_origins(),
            seed_file: None,
            metrics_port: None,
            log_format: LogFormat::default(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(invalid("PORT must be non-zero"));
        }

        self.bind_addr()?;

        if self.metrics_port == Some(self.port) {
            return Err(invalid("METRICS_PORT must differ from PORT"));
        }

        self.cors_header_values()?;

        Ok(())
    }

    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|_| invalid(format!("BIND_HOST {:?} is not an IP address", self.bind_host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Socket address for the Prometheus exporter, if enabled.
    pub fn metrics_addr(&self) -> Result<Option<SocketAddr>> {
        let Some(port) = self.metrics_port else {
            return Ok(None);
        };
        Ok(Some(SocketAddr::new(self.bind_addr()?.ip(), port)))
    }

    /// Allowed origins as header values.
    ///
    /// Credentials are allowed, so a wildcard origin is rejected.
    pub fn cors_header_values(&self) -> Result<Vec<HeaderValue>> {
        if self.cors_origins.is_empty() {
            return Err(invalid("CORS_ORIGINS must name at least one origin"));
        }

        self.cors_origins
            .iter()
            .map(|origin| {
                let origin = origin.trim();
                if origin == "*" {
                    return Err(invalid("CORS_ORIGINS cannot contain '*' when credentials are allowed"));
                }
                HeaderValue::from_str(origin)
                    .map_err(|_| invalid(format!("CORS origin {origin:?} is not a valid header value")))
            })
            .collect()
    }
}

fn invalid(reason: impl Into<String>) -> ServiceError {
    ServiceError::InvalidConfig(reason.into())
}
