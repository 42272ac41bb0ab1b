//! Auth handlers: verification code, register, login, refresh, me.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{debug, info};
use validator::Validate;

use namesmith_auth::{AccessToken, PasswordHasher};
use namesmith_core::error::AppError;
use namesmith_core::result::AppResult;
use namesmith_core::traits::MailMessage;
use namesmith_entity::NewUser;

use crate::dto::request::{CodeQuery, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, ResultResponse, UserEnvelope, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthPrincipal, ValidatedJson};
use crate::state::AppState;

/// GET /auth/code?email=
///
/// Mails a fresh numeric code and records it. Nothing is stored if the mail
/// cannot be sent.
pub async fn send_code(
    State(state): State<AppState>,
    query: Result<Query<CodeQuery>, QueryRejection>,
) -> Result<Json<ResultResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| AppError::validation(rejection.body_text()))?;
    query
        .validate()
        .map_err(|errors| AppError::validation(errors.to_string()))?;

    let mail_config = &state.config.mail;
    let code = generate_code(mail_config.code_length);

    state
        .mailer
        .send(MailMessage {
            to: query.email.clone(),
            subject: mail_config.code_subject.clone(),
            body: format!(
                "Your verification code is {code}. It expires in {} minutes.",
                mail_config.code_ttl_seconds / 60
            ),
        })
        .await?;

    state.codes().create(&query.email, &code).await?;

    info!(email = %query.email, "Verification code sent");
    Ok(Json(ResultResponse::success()))
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let code_length = state.config.mail.code_length;
    if req.code.chars().count() != code_length {
        return Err(AppError::validation(format!(
            "Verification code must be {code_length} digits"
        ))
        .into());
    }

    state
        .password_validator
        .validate(&req.password, &req.confirm_password)?;

    let code_ttl = code_ttl(state.config.mail.code_ttl_seconds);
    let fresh = state
        .codes()
        .latest_matching(&req.email, &req.code)
        .await?
        .is_some_and(|code| code.is_fresh(Utc::now(), code_ttl));
    if !fresh {
        return Err(AppError::validation("Invalid or expired verification code").into());
    }

    if state.users().find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Email '{}' is already registered",
            req.email
        ))
        .into());
    }

    let hasher = state.password_hasher;
    let RegisterRequest {
        email,
        username,
        password,
        ..
    } = req;
    let new_user = run_blocking(move || {
        NewUser::with_password(email, username, &password, &hasher)
    })
    .await?;

    let user = state.users().create(&new_user).await?;

    // Codes are single-use once they have produced an account.
    let consumed = state.codes().delete_for(&user.email).await?;
    debug!(user_id = user.id, consumed, "Verification codes consumed");

    info!(user_id = user.id, "User registered");
    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let invalid = || AppError::unauthorized("Invalid email or password");

    let user = state
        .users()
        .find_by_email(&req.email)
        .await?
        .ok_or_else(invalid)?;

    let hasher: PasswordHasher = state.password_hasher;
    let candidate = user.clone();
    let matches = run_blocking(move || candidate.check_password(&req.password, &hasher)).await?;
    if !matches {
        info!(user_id = user.id, "Login rejected");
        return Err(invalid().into());
    }

    let tokens = state.auth.issue_login_pair(user.principal())?;

    info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse {
        user: UserResponse::from(&user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// POST /auth/refresh
///
/// Issues a new access token; the refresh token itself stays valid until it
/// expires.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<AccessToken>, ApiError> {
    let principal = state.auth.verify_refresh(&req.refresh_token)?;
    let token = state.auth.issue_refreshed_access(principal)?;

    debug!(principal = %principal, "Access token refreshed");
    Ok(Json(token))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthPrincipal,
) -> Result<Json<UserEnvelope>, ApiError> {
    let user = state
        .users()
        .find_by_id(auth.id().get())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// A random string of `length` decimal digits.
fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

fn code_ttl(seconds: u64) -> Duration {
    i64::try_from(seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}

/// Runs CPU-heavy password work off the async workers.
async fn run_blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Password task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code() {
        for _ in 0..100 {
            let code = generate_code(4);
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
        assert_eq!(generate_code(0), "");
    }

    #[test]
    fn test_code_ttl_saturates() {
        assert_eq!(code_ttl(600), Duration::minutes(10));
        assert_eq!(code_ttl(u64::MAX), Duration::MAX);
    }
}
