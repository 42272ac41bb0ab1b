//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod auth;
pub mod database;
pub mod logging;
pub mod mail;
pub mod server;

use serde::Deserialize;

pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::mail::MailConfig;
pub use self::server::{CorsConfig, ServerConfig};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "NAMESMITH";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay) and `NAMESMITH__*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    pub auth: AuthConfig,
    /// Verification-code mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Default settings for every section except `auth`, which has none.
    pub fn with_auth(auth: AuthConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth,
            mail: MailConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the environment-specific overlay
    /// `config/{env}`, and environment variables such as
    /// `NAMESMITH__AUTH__JWT_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        tracing::debug!(env, "Configuration loaded");
        Ok(config)
    }

    /// Checks invariants that cannot be expressed through serde defaults.
    pub fn validate(&self) -> Result<(), AppError> {
        self.server.validate()?;
        self.auth.validate()?;
        if self.mail.code_length == 0 {
            return Err(AppError::configuration("mail.code_length must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<AppConfig, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(
            r#"
            [auth]
            jwt_secret = "unit-test-secret"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.auth.access_token_ttl_seconds, 900);
        assert_eq!(config.auth.refresh_token_ttl_seconds, 604_800);
        assert_eq!(config.auth.leeway_seconds, 0);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.mail.code_ttl_seconds, 600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_pretty_logging_and_unknown_format() {
        let config = parse(
            r#"
            [auth]
            jwt_secret = "unit-test-secret"

            [logging]
            format = "pretty"
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.logging.format, LogFormat::Pretty);

        let err = parse(
            r#"
            [auth]
            jwt_secret = "unit-test-secret"

            [logging]
            format = "xml"
            "#,
        )
        .expect_err("unknown format");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = parse(
            r#"
            [auth]
            access_token_ttl_seconds = 60
            "#,
        )
        .expect_err("secret is required");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_blank_secret_is_rejected() {
        let err = parse(
            r#"
            [auth]
            jwt_secret = "   "
            "#,
        )
        .expect_err("blank secret must fail validation");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
