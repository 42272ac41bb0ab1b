//! Convenience result type alias for Namesmith.

use crate::error::AppError;

/// A specialized `Result` type for Namesmith operations.
pub type AppResult<T> = Result<T, AppError>;
