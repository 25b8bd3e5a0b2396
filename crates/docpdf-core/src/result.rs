//! Convenience result type alias for DocPdf.

use crate::error::AppError;

/// A specialized `Result` type for DocPdf operations.
pub type AppResult<T> = Result<T, AppError>;
