//! Signed bearer tokens: payloads, codec, issuance, and verification.

pub mod claims;
pub mod codec;
pub mod error;
pub mod issuer;
pub mod verifier;

pub use claims::{AccessToken, DecodedClaims, TokenKind, TokenPair, TokenPayload};
pub use codec::TokenCodec;
pub use error::{FailureClass, TokenError, TokenFailure};
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
