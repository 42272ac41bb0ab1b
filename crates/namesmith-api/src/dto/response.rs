//! Response DTOs.

use serde::{Deserialize, Serialize};

use namesmith_entity::User;

/// Body of `GET /` and `GET /hello/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Outcome of an operation with no other payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultResponse {
    /// `"success"` or `"failure"`.
    pub result: String,
}

impl ResultResponse {
    /// The success outcome.
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Email.
    pub email: String,
    /// Username.
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
        }
    }
}

/// A single user wrapped in an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The user.
    pub user: UserResponse,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User info.
    pub user: UserResponse,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `"connected"`, `"memory"` or `"unavailable"`.
    pub database: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
}
