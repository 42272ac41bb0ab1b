//! Password policy for registration.

use namesmith_core::config::AuthConfig;
use namesmith_core::error::AppError;

/// Checks new passwords against the configured length bounds.
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Validates a password and its confirmation.
    ///
    /// Returns the first violation found.
    pub fn validate(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if password != confirmation {
            return Err(AppError::validation("Passwords do not match"));
        }

        Ok(())
    }
}
