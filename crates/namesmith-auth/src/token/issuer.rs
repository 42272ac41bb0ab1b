//! Token issuance with per-kind lifetimes.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use namesmith_core::config::AuthConfig;
use namesmith_core::config::auth::MAX_TOKEN_TTL_SECONDS;
use namesmith_core::error::AppError;
use namesmith_core::types::PrincipalId;

use super::claims::{AccessToken, TokenKind, TokenPair, TokenPayload};
use super::codec::TokenCodec;

/// Creates signed access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer using the lifetimes from `config`.
    pub fn new(codec: Arc<TokenCodec>, config: &AuthConfig) -> Self {
        Self {
            codec,
            access_ttl: seconds(config.access_token_ttl_seconds),
            refresh_ttl: seconds(config.refresh_token_ttl_seconds),
        }
    }

    /// Lifetime of tokens of the given kind.
    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }

    /// Signs a token of `kind` for `principal` as if issued at `now`.
    pub fn issue_at(
        &self,
        kind: TokenKind,
        principal: PrincipalId,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let payload = TokenPayload::new(principal, kind, now + self.ttl(kind));
        self.codec.encode(&payload)
    }

    /// Signs an access token for `principal`.
    pub fn issue_access(&self, principal: PrincipalId) -> Result<String, AppError> {
        self.issue_at(TokenKind::Access, principal, Utc::now())
    }

    /// Signs a refresh token for `principal`.
    pub fn issue_refresh(&self, principal: PrincipalId) -> Result<String, AppError> {
        self.issue_at(TokenKind::Refresh, principal, Utc::now())
    }

    /// Signs the access + refresh pair handed out on login.
    pub fn issue_login_pair(&self, principal: PrincipalId) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.issue_at(TokenKind::Access, principal, now)?,
            refresh_token: self.issue_at(TokenKind::Refresh, principal, now)?,
        })
    }

    /// Signs a fresh access token after a refresh token was accepted.
    ///
    /// The refresh token itself is not rotated.
    pub fn issue_refreshed_access(&self, principal: PrincipalId) -> Result<AccessToken, AppError> {
        Ok(AccessToken {
            access_token: self.issue_access(principal)?,
        })
    }
}

fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(MAX_TOKEN_TTL_SECONDS) as i64)
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn issuer(access: u64, refresh: u64) -> (TokenIssuer, Arc<TokenCodec>) {
        let config = AuthConfig::with_secret("issuer-secret").with_ttls(access, refresh);
        let codec = Arc::new(TokenCodec::new(&SecretString::from("issuer-secret".to_string()), 0));
        (TokenIssuer::new(Arc::clone(&codec), &config), codec)
    }

    #[test]
    fn test_expiry_follows_kind_lifetime() {
        let (issuer, codec) = issuer(60, 3600);
        let now = Utc::now();

        let access = issuer.issue_at(TokenKind::Access, PrincipalId::new(5), now).unwrap();
        let refresh = issuer.issue_at(TokenKind::Refresh, PrincipalId::new(5), now).unwrap();

        assert_eq!(codec.decode(&access).unwrap().exp, now.timestamp() + 60);
        assert_eq!(codec.decode(&refresh).unwrap().exp, now.timestamp() + 3600);
    }

    #[test]
    fn test_login_pair_carries_both_kinds() {
        let (issuer, codec) = issuer(60, 3600);
        let pair = issuer.issue_login_pair(PrincipalId::new(7)).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = codec.decode(&pair.access_token).unwrap();
        let refresh = codec.decode(&pair.refresh_token).unwrap();
        assert_eq!(access.kind(), Some(TokenKind::Access));
        assert_eq!(refresh.kind(), Some(TokenKind::Refresh));
        assert_eq!(access.principal(), Some(PrincipalId::new(7)));
        assert_eq!(refresh.principal(), Some(PrincipalId::new(7)));
    }

    #[test]
    fn test_refreshed_access_is_access_kind() {
        let (issuer, codec) = issuer(60, 3600);
        let token = issuer.issue_refreshed_access(PrincipalId::new(9)).unwrap();
        let claims = codec.decode(&token.access_token).unwrap();
        assert_eq!(claims.kind(), Some(TokenKind::Access));
    }
}
