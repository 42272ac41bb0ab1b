//! Email verification code repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use namesmith_core::error::{AppError, ErrorKind};
use namesmith_core::result::AppResult;
use namesmith_entity::EmailCode;

use super::EmailCodeStore;

/// PostgreSQL-backed [`EmailCodeStore`].
#[derive(Debug, Clone)]
pub struct EmailCodeRepository {
    pool: PgPool,
}

impl EmailCodeRepository {
    /// Create a new email code repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailCodeStore for EmailCodeRepository {
    async fn create(&self, email: &str, code: &str) -> AppResult<EmailCode> {
        sqlx::query_as::<_, EmailCode>(
            "INSERT INTO email_codes (email, code) VALUES (LOWER($1), $2) RETURNING *",
        )
        .bind(email)
        .bind(code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store email code", e))
    }

    async fn latest_matching(&self, email: &str, code: &str) -> AppResult<Option<EmailCode>> {
        sqlx::query_as::<_, EmailCode>(
            r#"SELECT * FROM email_codes
               WHERE email = LOWER($1) AND code = $2
               ORDER BY created_at DESC, id DESC
               LIMIT 1"#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find email code", e))
    }

    async fn delete_for(&self, email: &str) -> AppResult<u64> {
        sqlx::query("DELETE FROM email_codes WHERE email = LOWER($1)")
            .bind(email)
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete email codes", e)
            })
    }
}
