//! Process-wide owner of the token signing secret.
//!
//! Exactly one [`AuthService`] exists per process once [`AuthService::initialize`]
//! has run. Tokens signed by one instance cannot be verified by an instance
//! holding another secret, so re-initializing with a different secret is
//! refused instead of silently orphaning every token already handed out.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use namesmith_core::config::AuthConfig;
use namesmith_core::error::AppError;
use namesmith_core::types::PrincipalId;

use super::singleton::Singleton;
use crate::token::{AccessToken, TokenCodec, TokenError, TokenIssuer, TokenPair, TokenVerifier};

static AUTH_SERVICE: Singleton<AuthService> = Singleton::new();

/// Issues and verifies bearer tokens with the process signing secret.
#[derive(Debug)]
pub struct AuthService {
    secret: SecretString,
    settings: TokenSettings,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthService {
    /// Builds a standalone service from `config`.
    ///
    /// Most callers want [`AuthService::initialize`]; a standalone instance
    /// does not share tokens with the process-wide one unless the secrets match.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        config.validate()?;

        let codec = Arc::new(TokenCodec::new(&config.jwt_secret, config.leeway_seconds));
        Ok(Self {
            secret: config.jwt_secret.clone(),
            settings: TokenSettings::from(config),
            issuer: TokenIssuer::new(Arc::clone(&codec), config),
            verifier: TokenVerifier::new(codec),
        })
    }

    /// Installs the process-wide instance, or returns it if already installed.
    ///
    /// Fails with a configuration error if the existing instance was built
    /// with a different secret or different token lifetimes.
    pub fn initialize(config: &AuthConfig) -> Result<&'static AuthService, AppError> {
        let service = AUTH_SERVICE.get_or_try_init(|| {
            let service = AuthService::new(config)?;
            info!(
                access_ttl_seconds = config.access_token_ttl_seconds,
                refresh_ttl_seconds = config.refresh_token_ttl_seconds,
                "Auth service initialized"
            );
            Ok::<_, AppError>(service)
        })?;

        if !service.holds_secret(&config.jwt_secret) {
            warn!("Rejected auth service re-initialization with a different signing secret");
            return Err(AppError::configuration(
                "Auth service is already initialized with a different signing secret",
            ));
        }
        if service.settings != TokenSettings::from(config) {
            warn!("Rejected auth service re-initialization with different token settings");
            return Err(AppError::configuration(
                "Auth service is already initialized with different token lifetimes",
            ));
        }

        Ok(service)
    }

    /// Returns the process-wide instance.
    pub fn global() -> Result<&'static AuthService, AppError> {
        AUTH_SERVICE
            .get()
            .ok_or_else(|| AppError::configuration("Auth service has not been initialized"))
    }

    fn holds_secret(&self, secret: &SecretString) -> bool {
        self.secret
            .expose_secret()
            .as_bytes()
            .ct_eq(secret.expose_secret().as_bytes())
            .into()
    }

    /// The issuer backing this service.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// The verifier backing this service.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Signs an access token for `principal`.
    pub fn issue_access(&self, principal: PrincipalId) -> Result<String, AppError> {
        self.issuer.issue_access(principal)
    }

    /// Signs a refresh token for `principal`.
    pub fn issue_refresh(&self, principal: PrincipalId) -> Result<String, AppError> {
        self.issuer.issue_refresh(principal)
    }

    /// Signs the access + refresh pair returned by login.
    pub fn issue_login_pair(&self, principal: PrincipalId) -> Result<TokenPair, AppError> {
        self.issuer.issue_login_pair(principal)
    }

    /// Signs a new access token for a principal whose refresh token was accepted.
    pub fn issue_refreshed_access(&self, principal: PrincipalId) -> Result<AccessToken, AppError> {
        self.issuer.issue_refreshed_access(principal)
    }

    /// Verifies an access token and returns its principal.
    pub fn verify_access(&self, token: &str) -> Result<PrincipalId, TokenError> {
        self.verifier.verify_access(token)
    }

    /// Verifies a refresh token and returns its principal.
    pub fn verify_refresh(&self, token: &str) -> Result<PrincipalId, TokenError> {
        self.verifier.verify_refresh(token)
    }
}

/// The token parameters an instance was built with, other than the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TokenSettings {
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
    leeway_seconds: u64,
}

impl From<&AuthConfig> for TokenSettings {
    fn from(config: &AuthConfig) -> Self {
        Self {
            access_ttl_seconds: config.access_token_ttl_seconds,
            refresh_ttl_seconds: config.refresh_token_ttl_seconds,
            leeway_seconds: config.leeway_seconds,
        }
    }
}
