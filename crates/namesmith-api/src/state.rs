//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use namesmith_auth::{AuthService, PasswordHasher, PasswordValidator};
use namesmith_core::config::AppConfig;
use namesmith_core::traits::Mailer;
use namesmith_database::{EmailCodeStore, Stores, UserStore};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance and verification
    pub auth: &'static AuthService,
    /// User and verification code stores
    pub stores: Stores,
    /// Outgoing mail
    pub mailer: Arc<dyn Mailer>,
    /// Password hasher (Argon2)
    pub password_hasher: PasswordHasher,
    /// Registration password policy
    pub password_validator: Arc<PasswordValidator>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wires the state from its collaborators.
    pub fn new(
        config: Arc<AppConfig>,
        auth: &'static AuthService,
        stores: Stores,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        Self {
            config,
            auth,
            stores,
            mailer,
            password_hasher: PasswordHasher::new(),
            password_validator,
            started_at: Instant::now(),
        }
    }

    /// User store.
    pub fn users(&self) -> &dyn UserStore {
        self.stores.users.as_ref()
    }

    /// Verification code store.
    pub fn codes(&self) -> &dyn EmailCodeStore {
        self.stores.codes.as_ref()
    }
}
