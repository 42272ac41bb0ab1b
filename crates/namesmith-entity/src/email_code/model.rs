//! Email verification code entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A verification code mailed to an address before registration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailCode {
    /// Row identifier.
    pub id: i64,
    /// Address the code was sent to.
    pub email: String,
    /// The decimal code.
    pub code: String,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
}

impl EmailCode {
    /// Whether the code is still usable at `now` given its validity window.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at <= ttl
    }
}
