//! HS256 encoding and decoding of token payloads.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use namesmith_core::error::AppError;

use super::claims::{DecodedClaims, TokenPayload};
use super::error::TokenFailure;

/// Signs payloads and verifies tokens with a shared HMAC secret.
///
/// Signature and expiry are checked together inside `jsonwebtoken::decode`,
/// so a payload is never handed out before both checks pass.
#[derive(Clone)]
pub struct TokenCodec {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Fixed HS256 header.
    header: Header,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a codec for `secret`, allowing `leeway_seconds` of clock skew on `exp`.
    pub fn new(secret: &SecretString, leeway_seconds: u64) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    /// Serializes and signs `payload` into a compact `header.payload.signature` token.
    pub fn encode(&self, payload: &TokenPayload) -> Result<String, AppError> {
        encode(&self.header, payload, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    /// Verifies signature and expiry of `token` and returns its claims.
    pub fn decode(&self, token: &str) -> Result<DecodedClaims, TokenFailure> {
        decode::<DecodedClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let failure = classify(e.kind());
                debug!(?failure, reason = %e, "Token decode failed");
                failure
            })
    }
}

fn classify(kind: &JwtErrorKind) -> TokenFailure {
    match kind {
        JwtErrorKind::ExpiredSignature => TokenFailure::Expired,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_)
        | JwtErrorKind::MissingRequiredClaim(_) => TokenFailure::Malformed,
        _ => TokenFailure::InvalidSignature,
    }
}
