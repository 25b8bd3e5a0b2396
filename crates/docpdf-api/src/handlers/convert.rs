//! Conversion handler.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use docpdf_converter::ConversionOptions;
use docpdf_core::error::AppError;
use docpdf_service::{ConversionRequest, UploadError, UploadedFile};

use crate::dto::request::{ConvertForm, FIELD_FILE};
use crate::dto::response::ConvertResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/convert
///
/// Accepts a multipart form with a `file` part and the optional text
/// fields `pageSize`, `orientation`, `preserveFormatting` and
/// `optimizePDF`. A body that is not multipart at all is treated as a
/// request without a file.
pub async fn convert(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(UploadError::MissingFile.into());
    };

    let max_bytes = state.config.staging.max_upload_size_bytes;
    let mut file: Option<UploadedFile> = None;
    let mut form = ConvertForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == FIELD_FILE {
            // A part without a filename is a plain text field, not a file.
            let Some(file_name) = field.file_name().map(str::to_string) else {
                continue;
            };
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error(e, max_bytes))?;
            if file.is_none() {
                file = Some(UploadedFile { file_name, data });
            }
        } else if ConvertForm::accepts(&name) {
            let value = field
                .text()
                .await
                .map_err(|e| multipart_error(e, max_bytes))?;
            form.set(&name, value);
        }
    }

    let options = ConversionOptions::from_form(
        form.page_size,
        form.orientation,
        form.preserve_formatting.as_deref(),
        form.optimize_pdf.as_deref(),
    );

    let outcome = state
        .conversion_service
        .convert(ConversionRequest { file, options })
        .await?;

    Ok(Json(ConvertResponse {
        success: true,
        download_url: outcome.reference.download_url(),
        filename: outcome.filename,
    }))
}

fn multipart_error(err: MultipartError, max_bytes: u64) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(format!("File too large (maximum {max_bytes} bytes)"))
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}
