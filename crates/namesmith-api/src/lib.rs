//! # namesmith-api
//!
//! HTTP API layer for Namesmith built on Axum.
//!
//! Provides the registration and token endpoints, the bearer-token guard,
//! request logging, CORS, DTOs, and the mapping from `AppError` to HTTP
//! status codes.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod router;
pub mod state;

pub use mailer::LogMailer;
pub use router::build_router;
pub use state::AppState;
