//! Store traits and their PostgreSQL implementations.
//!
//! Handlers depend on the traits only, so the same router runs against
//! PostgreSQL or the in-memory stores in [`crate::memory`].

pub mod email_code;
pub mod user;

use async_trait::async_trait;

use namesmith_core::result::AppResult;
use namesmith_entity::{EmailCode, NewUser, User};

pub use email_code::EmailCodeRepository;
pub use user::UserRepository;

/// Persistence for registered users.
///
/// Emails are unique and compared case-insensitively.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: &NewUser) -> AppResult<User>;
}

/// Persistence for emailed verification codes.
#[async_trait]
pub trait EmailCodeStore: Send + Sync + 'static {
    /// Record a code just sent to `email`.
    async fn create(&self, email: &str, code: &str) -> AppResult<EmailCode>;

    /// The most recent record of `code` being sent to `email`, if any.
    ///
    /// Earlier codes stay usable after a resend; freshness is the caller's check.
    async fn latest_matching(&self, email: &str, code: &str) -> AppResult<Option<EmailCode>>;

    /// Drop every code issued to `email`. Returns how many were removed.
    async fn delete_for(&self, email: &str) -> AppResult<u64>;
}
