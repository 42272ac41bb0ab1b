//! # namesmith-database
//!
//! The user and email-code stores. Every store has a sqlx implementation,
//! with the schema migrated on connect, and a `dashmap`-backed in-memory one
//! selected by `database.url = "memory"`.

pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod stores;

pub use repositories::{EmailCodeStore, UserStore};
pub use stores::Stores;
