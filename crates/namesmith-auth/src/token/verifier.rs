//! Token verification.
//!
//! A verification is a single pass over (token, clock, secret):
//!
//! 1. decode, checking signature and expiry together
//! 2. compare the `sub` claim with the expected token kind
//! 3. parse the principal out of `iss`
//!
//! The first failing step ends the pass with a [`TokenError`].

use std::sync::Arc;

use tracing::debug;

use namesmith_core::types::PrincipalId;

use super::claims::TokenKind;
use super::codec::TokenCodec;
use super::error::{TokenError, TokenFailure};

/// Validates access and refresh tokens and extracts the principal.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    codec: Arc<TokenCodec>,
}

impl TokenVerifier {
    /// Creates a verifier sharing `codec` with the issuer.
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Verifies an access token. Failures classify as forbidden.
    pub fn verify_access(&self, token: &str) -> Result<PrincipalId, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    /// Verifies a refresh token. Failures classify as unauthorized.
    pub fn verify_refresh(&self, token: &str) -> Result<PrincipalId, TokenError> {
        self.verify(token, TokenKind::Refresh)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<PrincipalId, TokenError> {
        let reject = |failure: TokenFailure| {
            debug!(expected = %expected, ?failure, "Token rejected");
            TokenError::new(expected, failure)
        };

        let claims = self.codec.decode(token).map_err(reject)?;

        if claims.kind() != Some(expected) {
            return Err(reject(TokenFailure::WrongTokenType));
        }

        claims
            .principal()
            .ok_or_else(|| reject(TokenFailure::MissingSubject))
    }
}
