//! Request DTOs with validation.
//!
//! Password length bounds come from configuration and are enforced by
//! `PasswordValidator`, not here.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /auth/code`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeQuery {
    /// Address to send the code to.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, also the login name.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 3, max = 20, message = "Username must be 3 to 20 characters"))]
    pub username: String,
    /// Password.
    pub password: String,
    /// Must repeat `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    /// Verification code received by mail. Its length is checked against
    /// `mail.code_length` by the handler.
    #[validate(length(min = 1, message = "Verification code is required"))]
    pub code: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}
