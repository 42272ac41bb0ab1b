//! Typed verification failures.

use thiserror::Error;

use namesmith_core::error::{AppError, ErrorKind};

use super::claims::TokenKind;

/// Why a token was rejected. Every variant is terminal; none is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TokenFailure {
    /// The embedded `exp` lies in the past.
    #[error("token has expired")]
    Expired,
    /// The token or its payload could not be parsed.
    #[error("token is malformed")]
    Malformed,
    /// Signature mismatch, wrong algorithm, or tampered claims.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The `sub` claim names a different token kind.
    #[error("wrong token type")]
    WrongTokenType,
    /// The `iss` claim is absent or not a principal id.
    #[error("token has no usable iss claim")]
    MissingSubject,
}

/// Transport-independent classification of a failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Any failure on the access-token path.
    Forbidden,
    /// Any failure on the refresh-token path.
    Unauthorized,
}

/// A failed verification together with the token kind that was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{expected} token rejected: {failure}")]
pub struct TokenError {
    /// The kind the caller asked to verify.
    pub expected: TokenKind,
    /// The reason for rejection.
    pub failure: TokenFailure,
}

impl TokenError {
    /// Pairs a failure with the verification path it happened on.
    pub const fn new(expected: TokenKind, failure: TokenFailure) -> Self {
        Self { expected, failure }
    }

    /// Access-path failures are forbidden, refresh-path failures unauthorized,
    /// whatever the underlying reason.
    pub const fn classification(&self) -> FailureClass {
        match self.expected {
            TokenKind::Access => FailureClass::Forbidden,
            TokenKind::Refresh => FailureClass::Unauthorized,
        }
    }

    /// Client-facing description of the failure.
    pub fn message(&self) -> String {
        let label = match self.expected {
            TokenKind::Access => "Access token",
            TokenKind::Refresh => "Refresh token",
        };
        match self.failure {
            TokenFailure::Expired => format!("{label} has expired"),
            TokenFailure::WrongTokenType => "Wrong token type".to_string(),
            TokenFailure::MissingSubject => "Token is missing the iss claim".to_string(),
            other => format!("{label} unusable: {other}"),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let kind = match err.classification() {
            FailureClass::Forbidden => ErrorKind::Forbidden,
            FailureClass::Unauthorized => ErrorKind::Unauthorized,
        };
        AppError::with_source(kind, err.message(), err)
    }
}
