//! # namesmith-entity
//!
//! Domain entity models for Namesmith. Every struct in this crate represents
//! a database table row or the data needed to create one. Row types derive
//! `sqlx::FromRow`.

pub mod email_code;
pub mod user;

pub use email_code::EmailCode;
pub use user::{NewUser, User};
