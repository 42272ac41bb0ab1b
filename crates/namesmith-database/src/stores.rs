//! Store selection from configuration.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tracing::{info, warn};

use namesmith_core::config::DatabaseConfig;
use namesmith_core::result::AppResult;

use crate::memory::{MemoryEmailCodeStore, MemoryUserStore};
use crate::postgres;
use crate::repositories::{EmailCodeRepository, EmailCodeStore, UserRepository, UserStore};

/// The stores the API runs against, plus the pool when one is in use.
#[derive(Clone)]
pub struct Stores {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Verification code persistence.
    pub codes: Arc<dyn EmailCodeStore>,
    /// `None` in memory mode.
    pub pool: Option<PgPool>,
}

impl Stores {
    /// Connects to PostgreSQL and runs migrations, or builds in-memory
    /// stores when `database.url` is `memory`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if config.is_memory() {
            warn!("Using in-memory stores; data is lost on restart");
            return Ok(Self::in_memory());
        }

        let pool = postgres::open(config).await?;
        info!("PostgreSQL stores ready");

        Ok(Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            codes: Arc::new(EmailCodeRepository::new(pool.clone())),
            pool: Some(pool),
        })
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            codes: Arc::new(MemoryEmailCodeStore::new()),
            pool: None,
        }
    }

    /// Whether the stores live in process memory.
    pub fn is_memory(&self) -> bool {
        self.pool.is_none()
    }

    /// Whether the backing database answers. Always true in memory mode.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => postgres::ping(pool).await,
            None => Ok(true),
        }
    }

    /// Closes the pool, giving in-flight queries up to `grace` to finish.
    ///
    /// Returns `false` if the pool was still closing when `grace` ran out.
    pub async fn close(&self, grace: Duration) -> bool {
        let Some(pool) = &self.pool else {
            return true;
        };
        let closed = tokio::time::timeout(grace, pool.close()).await.is_ok();
        if closed {
            info!("Database pool closed");
        }
        closed
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("memory", &self.pool.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_stores() {
        let stores = Stores::in_memory();
        assert!(stores.is_memory());
        assert!(stores.health_check().await.unwrap());
        assert!(stores.close(Duration::from_millis(10)).await);
        assert_eq!(format!("{stores:?}"), "Stores { memory: true }");
    }
}
