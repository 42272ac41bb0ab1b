//! Claims carried in access and refresh tokens.
//!
//! Every token holds exactly three claims, all string-encoded except `exp`:
//!
//! | claim | meaning          | encoding                          |
//! |-------|------------------|-----------------------------------|
//! | `iss` | principal id     | decimal string                    |
//! | `sub` | token kind       | `"1"` access, `"2"` refresh       |
//! | `exp` | expiry           | Unix timestamp, integer seconds   |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use namesmith_core::types::PrincipalId;

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Short-lived token presented to protected endpoints.
    Access = 1,
    /// Long-lived token exchanged for a fresh access token.
    Refresh = 2,
}

impl TokenKind {
    /// The value stored in the `sub` claim.
    pub const fn claim_value(self) -> &'static str {
        match self {
            Self::Access => "1",
            Self::Refresh => "2",
        }
    }

    /// Parses a `sub` claim value.
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "1" => Some(Self::Access),
            "2" => Some(Self::Refresh),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// Payload signed into every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Principal id as a decimal string.
    pub iss: String,
    /// Token kind claim value.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl TokenPayload {
    /// Builds the payload for `principal` expiring at `expires_at`.
    pub fn new(principal: PrincipalId, kind: TokenKind, expires_at: DateTime<Utc>) -> Self {
        Self {
            iss: principal.to_string(),
            sub: kind.claim_value().to_string(),
            exp: expires_at.timestamp(),
        }
    }
}

/// Claims as read back from a verified token.
///
/// `iss` and `sub` are kept as raw JSON values so that a well-signed token
/// whose claims are absent or of an unexpected type is reported as a claim
/// failure rather than a structural one. A numeric `iss` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodedClaims {
    /// Principal id claim, if present.
    #[serde(default)]
    pub iss: Option<Value>,
    /// Token kind claim, if present.
    #[serde(default)]
    pub sub: Option<Value>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl DecodedClaims {
    /// The token kind named by `sub`, if recognizable.
    pub fn kind(&self) -> Option<TokenKind> {
        self.sub
            .as_ref()
            .and_then(Value::as_str)
            .and_then(TokenKind::from_claim)
    }

    /// The principal named by `iss`: a decimal string or a JSON integer.
    pub fn principal(&self) -> Option<PrincipalId> {
        match self.iss.as_ref()? {
            Value::String(iss) => iss.parse().ok(),
            Value::Number(iss) => iss.as_i64().map(PrincipalId::new),
            _ => None,
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Tokens returned after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Token returned after a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Newly minted access token.
    pub access_token: String,
}
