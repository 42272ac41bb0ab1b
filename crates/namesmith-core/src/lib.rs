//! # namesmith-core
//!
//! Core crate for Namesmith. Contains configuration schemas, the principal
//! identifier type, collaborator traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Namesmith crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::PrincipalId;
