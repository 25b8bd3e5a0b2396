//! Single-use downloads of converted PDFs.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use docpdf_core::AppResult;
use docpdf_core::error::AppError;

use crate::reference::DownloadReference;
use crate::staging::{StagingArea, remove_quietly};

/// Content type of every download.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Message returned for unknown, malformed, or already-consumed references.
const NOT_FOUND_MESSAGE: &str = "File not found";

/// Bytes of a claimed output, ready to send.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// The PDF content.
    pub data: Bytes,
    /// Filename offered to the requester, without the identifier prefix.
    pub filename: String,
    /// Always [`PDF_CONTENT_TYPE`].
    pub content_type: &'static str,
}

/// Serves each staged output at most once.
#[derive(Debug, Clone)]
pub struct DownloadService {
    staging: Arc<StagingArea>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(staging: Arc<StagingArea>) -> Self {
        Self { staging }
    }

    /// Claim, read and delete the output addressed by `raw_reference`.
    ///
    /// The output is first renamed to a private claim name, so of several
    /// concurrent requests for one reference exactly one succeeds and the
    /// rest see `NotFound`. The claimed file is deleted whether or not it
    /// could be read.
    pub async fn take(&self, raw_reference: &str) -> AppResult<DownloadResult> {
        let Some(reference) = DownloadReference::parse(raw_reference) else {
            tracing::debug!(reference = %raw_reference, "Rejected malformed download reference");
            return Err(AppError::not_found(NOT_FOUND_MESSAGE));
        };

        let output_path = self
            .staging
            .output_path(reference.id(), reference.file_name());
        let claim_path = self.staging.output_dir().join(format!(
            ".claim-{}-{reference}",
            Uuid::new_v4().simple()
        ));

        if let Err(e) = tokio::fs::rename(&output_path, &claim_path).await {
            if e.kind() == std::io::ErrorKind::NotFound {
                tracing::debug!(reference = %reference, "Download reference not found");
                return Err(AppError::not_found(NOT_FOUND_MESSAGE));
            }
            return Err(AppError::storage(format!("Failed to claim output: {e}")));
        }

        let read = tokio::fs::read(&claim_path).await;
        remove_quietly(&claim_path).await;
        let data = Bytes::from(
            read.map_err(|e| AppError::storage(format!("Failed to read output: {e}")))?,
        );

        tracing::info!(
            reference = %reference,
            size = data.len(),
            "Served and removed converted document"
        );

        Ok(DownloadResult {
            data,
            filename: reference.file_name().to_string(),
            content_type: PDF_CONTENT_TYPE,
        })
    }
}
