//! # namesmith-auth
//!
//! Authentication core for Namesmith.
//!
//! ## Modules
//!
//! - `token`: HS256 token codec, issuance of access/refresh tokens, and verification
//! - `service`: the process-wide [`AuthService`] owning the signing secret
//! - `password`: Argon2id password hashing and length policy

pub mod password;
pub mod service;
pub mod token;

pub use password::{PasswordHasher, PasswordValidator};
pub use service::{AuthService, Singleton};
pub use token::{
    AccessToken, FailureClass, TokenCodec, TokenError, TokenFailure, TokenIssuer, TokenKind,
    TokenPair, TokenPayload, TokenVerifier,
};
