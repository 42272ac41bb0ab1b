//! Listener and CORS settings for the HTTP server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Where the server listens and how long it waits on shutdown.
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Seconds granted to in-flight work after a shutdown signal.
    pub shutdown_grace_seconds: u64,
    /// Browser cross-origin policy.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port`, ready for a TCP bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The shutdown grace period.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.host.trim().is_empty() {
            return Err(AppError::configuration("server.host must not be empty"));
        }
        self.cors.validate()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            shutdown_grace_seconds: 30,
            cors: CorsConfig::default(),
        }
    }
}

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins, or `"*"` to allow any.
    pub allowed_origins: Vec<String>,
    /// How long a browser may cache a preflight answer, in seconds.
    pub max_age_seconds: u64,
}

impl CorsConfig {
    /// Whether `"*"` appears among the allowed origins.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.allowed_origins.is_empty() {
            return Err(AppError::configuration(
                "server.cors.allowed_origins must name at least one origin",
            ));
        }
        Ok(())
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age_seconds: 3600,
        }
    }
}
