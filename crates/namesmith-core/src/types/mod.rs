//! Core type definitions used across the Namesmith workspace.

pub mod principal;

pub use principal::PrincipalId;
