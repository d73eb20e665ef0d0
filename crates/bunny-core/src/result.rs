//! Convenience result type alias for Bunny Rewards.

use crate::error::AppError;

/// A specialized `Result` type for Bunny Rewards operations.
pub type AppResult<T> = Result<T, AppError>;
