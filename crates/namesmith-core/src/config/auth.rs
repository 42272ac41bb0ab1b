//! Authentication configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Upper bound for either token lifetime (one hundred years).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

/// Token signing and credential policy configuration.
///
/// The signing secret has no default: a deployment that forgets it must fail
/// at startup rather than sign with a well-known value.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(deserialize_with = "deserialize_secret")]
    pub jwt_secret: SecretString,
    /// Access token lifetime in seconds.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_seconds: u64,
    /// Refresh token lifetime in seconds.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_seconds: u64,
    /// Allowed clock skew when checking `exp`, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
}

impl AuthConfig {
    /// Builds a configuration with the given secret and default lifetimes.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::from(secret.into()),
            access_token_ttl_seconds: default_access_ttl(),
            refresh_token_ttl_seconds: default_refresh_ttl(),
            leeway_seconds: 0,
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
        }
    }

    /// Overrides both token lifetimes.
    pub fn with_ttls(mut self, access_seconds: u64, refresh_seconds: u64) -> Self {
        self.access_token_ttl_seconds = access_seconds;
        self.refresh_token_ttl_seconds = refresh_seconds;
        self
    }

    /// Rejects configurations that would make issuance meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.expose_secret().trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.access_token_ttl_seconds == 0 || self.refresh_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth token lifetimes must be positive",
            ));
        }
        if self.access_token_ttl_seconds > MAX_TOKEN_TTL_SECONDS
            || self.refresh_token_ttl_seconds > MAX_TOKEN_TTL_SECONDS
        {
            return Err(AppError::configuration(
                "auth token lifetimes exceed one hundred years",
            ));
        }
        if self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(
                "auth.password_min_length exceeds auth.password_max_length",
            ));
        }
        Ok(())
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_access_ttl() -> u64 {
    15 * 60
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_password_min() -> usize {
    6
}

fn default_password_max() -> usize {
    20
}
