//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use namesmith_core::result::AppResult;
use namesmith_core::traits::PasswordDigester;
use namesmith_core::types::PrincipalId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Auto-incremented user identifier.
    pub id: i64,
    /// Unique email address used to log in.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The principal this user authenticates as.
    pub fn principal(&self) -> PrincipalId {
        PrincipalId::new(self.id)
    }

    /// Check a plaintext password against the stored hash.
    pub fn check_password(
        &self,
        plaintext: &str,
        digester: &dyn PasswordDigester,
    ) -> AppResult<bool> {
        digester.matches(plaintext, &self.password_hash)
    }
}

/// Data required to create a new user.
///
/// The only way to build one is [`NewUser::with_password`], which hashes the
/// plaintext immediately; there is no path that stores a raw password.
#[derive(Debug, Clone)]
pub struct NewUser {
    email: String,
    username: String,
    password_hash: String,
}

impl NewUser {
    /// Hash `password` and capture the registration data.
    pub fn with_password(
        email: impl Into<String>,
        username: impl Into<String>,
        password: &str,
        digester: &dyn PasswordDigester,
    ) -> AppResult<Self> {
        Ok(Self {
            email: email.into(),
            username: username.into(),
            password_hash: digester.digest(password)?,
        })
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }
}
