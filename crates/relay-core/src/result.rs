//! Convenience result type alias for the relay.

use crate::error::AppError;

/// A specialized `Result` type for relay operations.
///
/// Host entry points, subscribers and lifecycle transitions all return
/// this type so failures flow through `?` unchanged.
pub type AppResult<T> = Result<T, AppError>;
