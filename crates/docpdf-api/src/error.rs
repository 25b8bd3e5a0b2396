//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use docpdf_core::error::{AppError, ErrorKind};

use crate::dto::response::ErrorResponse;

/// Wrapper that lets handlers return `AppError` from the core crate.
///
/// Every failure becomes `{"error": message}` with the status of its kind.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.kind.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match err.kind {
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::PayloadTooLarge => {
                tracing::debug!(kind = %err.kind, error = %err.message, "Request rejected");
            }
            ErrorKind::Conversion => {
                tracing::warn!(error = %err.message, "Conversion request failed");
            }
            ErrorKind::Storage | ErrorKind::Configuration | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
            }
        }

        (status, Json(ErrorResponse::new(err.message))).into_response()
    }
}
