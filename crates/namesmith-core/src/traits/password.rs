//! Password digest abstraction used by entity factories.

use crate::result::AppResult;

/// Turns plaintext passwords into stored digests and checks them back.
pub trait PasswordDigester: Send + Sync {
    /// Produce a salted digest suitable for storage.
    fn digest(&self, plaintext: &str) -> AppResult<String>;

    /// Check a plaintext password against a stored digest.
    fn matches(&self, plaintext: &str, digest: &str) -> AppResult<bool>;
}
