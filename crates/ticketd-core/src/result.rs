//! Convenience result type alias for ticketd.

use crate::error::AppError;

/// A specialized `Result` type for ticketd operations.
pub type AppResult<T> = Result<T, AppError>;
