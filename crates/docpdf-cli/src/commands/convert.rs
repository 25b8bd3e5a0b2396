//! One-shot local conversion.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use docpdf_converter::{ConversionOptions, ProcessConverter};
use docpdf_core::error::AppError;
use docpdf_service::{
    ConversionRequest, ConversionService, DownloadService, StagingArea, UploadValidator,
    UploadedFile,
};

use crate::output::{self, OutputFormat};

/// Arguments for `convert`
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Word document to convert (.doc or .docx)
    pub input: PathBuf,

    /// Where to write the PDF (default: input with a .pdf extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Page size passed to the converter
    #[arg(long, default_value = docpdf_converter::models::DEFAULT_PAGE_SIZE)]
    pub page_size: String,

    /// Page orientation passed to the converter
    #[arg(long, default_value = docpdf_converter::models::DEFAULT_ORIENTATION)]
    pub orientation: String,

    /// Do not ask the converter to preserve formatting
    #[arg(long)]
    pub no_preserve_formatting: bool,

    /// Do not ask the converter to optimize the PDF
    #[arg(long)]
    pub no_optimize: bool,
}

impl ConvertArgs {
    fn options(&self) -> ConversionOptions {
        ConversionOptions {
            page_size: self.page_size.clone(),
            orientation: self.orientation.clone(),
            preserve_formatting: !self.no_preserve_formatting,
            optimize_pdf: !self.no_optimize,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pdf"))
    }
}

/// Summary row printed after a conversion
#[derive(Debug, Serialize, Tabled)]
struct ConvertSummary {
    input: String,
    output: String,
    size_bytes: u64,
    duration_ms: u64,
}

/// Execute `convert`
pub async fn execute(
    args: &ConvertArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    let data = tokio::fs::read(&args.input).await.map_err(|e| {
        AppError::validation(format!("Cannot read '{}': {e}", args.input.display()))
    })?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let staging = Arc::new(StagingArea::from_config(&config.staging));
    staging.ensure_directories().await?;

    let service = ConversionService::new(
        Arc::clone(&staging),
        UploadValidator::new(config.staging.allowed_extensions.as_slice()),
        Arc::new(ProcessConverter::new(&config.converter)),
    );

    let outcome = service
        .convert(ConversionRequest {
            file: Some(UploadedFile {
                file_name,
                data: Bytes::from(data),
            }),
            options: args.options(),
        })
        .await?;

    // Consume the staged output exactly like an HTTP download would.
    let pdf = DownloadService::new(staging)
        .take(&outcome.reference.to_string())
        .await?;

    let output_path = args.output_path();
    write_output(&output_path, &pdf.data).await?;

    output::print_list(
        &[ConvertSummary {
            input: args.input.display().to_string(),
            output: output_path.display().to_string(),
            size_bytes: outcome.output_size,
            duration_ms: outcome.duration_ms,
        }],
        format,
    );

    Ok(())
}

async fn write_output(path: &Path, data: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create dir: {e}")))?;
    }

    tokio::fs::write(path, data)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write '{}': {e}", path.display())))
}
