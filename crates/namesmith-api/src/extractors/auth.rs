//! `AuthPrincipal` extractor: the bearer-token guard for protected routes.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use namesmith_core::error::AppError;
use namesmith_core::types::PrincipalId;

use crate::error::ApiError;
use crate::state::AppState;

/// The principal behind a valid access token.
///
/// Every rejection is `403 Forbidden`, including a missing header, so a
/// client cannot tell an absent token from an unusable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPrincipal(pub PrincipalId);

impl AuthPrincipal {
    /// The authenticated principal.
    pub fn id(&self) -> PrincipalId {
        self.0
    }
}

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::forbidden("Missing Authorization header"))?;

        let token = bearer_token(auth_header)
            .ok_or_else(|| AppError::forbidden("Invalid Authorization header format"))?;

        let principal = state.auth.verify_access(token)?;
        Ok(Self(principal))
    }
}

/// Pulls the credentials out of `Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
