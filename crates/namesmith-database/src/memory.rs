//! In-memory stores backed by `DashMap`.
//!
//! Used by tests and by the `memory` database mode. Contents vanish with the
//! process.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use namesmith_core::error::AppError;
use namesmith_core::result::AppResult;
use namesmith_entity::{EmailCode, NewUser, User};

use crate::repositories::{EmailCodeStore, UserStore};

/// [`UserStore`] kept in process memory.
#[derive(Debug)]
pub struct MemoryUserStore {
    users: DashMap<i64, User>,
    /// Lower-cased email to user id.
    emails: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl MemoryUserStore {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(&email.to_lowercase()).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        // The email slot stays locked until the user row is in place.
        match self.emails.entry(user.email().to_lowercase()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                user.email()
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let record = User {
                    id,
                    email: user.email().to_string(),
                    username: user.username().to_string(),
                    password_hash: user.password_hash().to_string(),
                    created_at: Utc::now(),
                };
                self.users.insert(id, record.clone());
                slot.insert(id);
                Ok(record)
            }
        }
    }
}

/// [`EmailCodeStore`] kept in process memory.
#[derive(Debug)]
pub struct MemoryEmailCodeStore {
    codes: DashMap<String, Vec<EmailCode>>,
    next_id: AtomicI64,
}

impl MemoryEmailCodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            codes: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Record a code as if it had been issued at `created_at`.
    pub fn create_at(&self, email: &str, code: &str, created_at: DateTime<Utc>) -> EmailCode {
        let email = email.to_lowercase();
        let record = EmailCode {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: email.clone(),
            code: code.to_string(),
            created_at,
        };
        self.codes.entry(email).or_default().push(record.clone());
        record
    }
}

impl Default for MemoryEmailCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailCodeStore for MemoryEmailCodeStore {
    async fn create(&self, email: &str, code: &str) -> AppResult<EmailCode> {
        Ok(self.create_at(email, code, Utc::now()))
    }

    async fn latest_matching(&self, email: &str, code: &str) -> AppResult<Option<EmailCode>> {
        Ok(self.codes.get(&email.to_lowercase()).and_then(|entry| {
            entry
                .value()
                .iter()
                .filter(|record| record.code == code)
                .max_by_key(|record| (record.created_at, record.id))
                .cloned()
        }))
    }

    async fn delete_for(&self, email: &str) -> AppResult<u64> {
        Ok(self
            .codes
            .remove(&email.to_lowercase())
            .map(|(_, codes)| codes.len() as u64)
            .unwrap_or(0))
    }
}
