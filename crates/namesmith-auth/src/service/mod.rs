//! The process-wide authentication service and its construction guard.

pub mod auth_service;
pub mod singleton;

pub use auth_service::AuthService;
pub use singleton::Singleton;
