//! The conversion seam.

use async_trait::async_trait;

use crate::error::ConversionError;
use crate::models::{ConversionJob, ConversionReport};

/// Something that turns a staged document into a PDF at `job.output_path`.
///
/// Implementations make exactly one attempt per call. `Ok` means the
/// output file exists and is non-empty.
#[async_trait]
pub trait DocumentConverter: Send + Sync + std::fmt::Debug {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Run one conversion.
    async fn convert(&self, job: &ConversionJob) -> Result<ConversionReport, ConversionError>;
}
