//! Conversion service: validate, stage, delegate, clean up.

use std::sync::Arc;

use serde::Serialize;

use docpdf_converter::{ConversionJob, ConversionOptions, DocumentConverter};
use docpdf_core::AppResult;

use crate::reference::DownloadReference;
use crate::staging::{StagingArea, remove_quietly};
use crate::upload::{UploadValidator, UploadedFile};

/// One incoming conversion request.
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    /// The file part, if the request carried one.
    pub file: Option<UploadedFile>,
    /// Options forwarded to the converter.
    pub options: ConversionOptions,
}

/// A finished conversion awaiting download.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    /// Reference under which the PDF can be downloaded once.
    pub reference: DownloadReference,
    /// Display filename of the PDF, without the identifier prefix.
    pub filename: String,
    /// Size of the PDF in bytes.
    pub output_size: u64,
    /// Converter wall-clock duration.
    pub duration_ms: u64,
}

/// Runs the convert half of the request lifecycle.
#[derive(Debug, Clone)]
pub struct ConversionService {
    staging: Arc<StagingArea>,
    validator: UploadValidator,
    converter: Arc<dyn DocumentConverter>,
}

impl ConversionService {
    /// Creates a new conversion service.
    pub fn new(
        staging: Arc<StagingArea>,
        validator: UploadValidator,
        converter: Arc<dyn DocumentConverter>,
    ) -> Self {
        Self {
            staging,
            validator,
            converter,
        }
    }

    /// The converter in use.
    pub fn converter(&self) -> &Arc<dyn DocumentConverter> {
        &self.converter
    }

    /// Convert one uploaded document.
    ///
    /// Validation failures touch neither the filesystem nor the converter.
    /// Once staged, the input is deleted whatever the outcome. A failed
    /// conversion also removes any partial output.
    pub async fn convert(&self, request: ConversionRequest) -> AppResult<ConversionOutcome> {
        let upload = self.validator.validate(request.file)?;

        let staged = self.staging.stage(&upload).await?;
        let id = staged.id();
        let output_name = upload.output_file_name();
        let output_path = self.staging.output_path(id, &output_name);

        tracing::info!(
            id = %id,
            original_name = %upload.original_name,
            size = upload.data.len(),
            converter = %self.converter.name(),
            "Converting document"
        );

        let job = ConversionJob {
            input_path: staged.path().to_path_buf(),
            output_path: output_path.clone(),
            options: request.options,
        };

        let result = self.converter.convert(&job).await;
        drop(staged);

        match result {
            Ok(report) => {
                if !report.stdout.trim().is_empty() {
                    tracing::debug!(id = %id, stdout = %report.stdout.trim(), "Converter output");
                }
                let reference = DownloadReference::new(id, output_name.clone());
                tracing::info!(
                    id = %id,
                    reference = %reference,
                    output_size = report.output_size,
                    duration_ms = report.duration_ms,
                    "Conversion succeeded"
                );
                Ok(ConversionOutcome {
                    reference,
                    filename: output_name,
                    output_size: report.output_size,
                    duration_ms: report.duration_ms,
                })
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Conversion failed");
                remove_quietly(&output_path).await;
                Err(e.into())
            }
        }
    }
}
