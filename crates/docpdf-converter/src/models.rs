//! Conversion options and job descriptors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Page size used when the request does not name one.
pub const DEFAULT_PAGE_SIZE: &str = "A4";
/// Orientation used when the request does not name one.
pub const DEFAULT_ORIENTATION: &str = "Portrait";

/// Options forwarded to the external converter.
///
/// Values are not validated here: whatever the requester sent is passed
/// through and the converter decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Page size, e.g. `A4`, `Letter`, `Legal`.
    pub page_size: String,
    /// `Portrait` or `Landscape`.
    pub orientation: String,
    /// Ask the converter to keep the source formatting.
    pub preserve_formatting: bool,
    /// Ask the converter to optimize the PDF for the web.
    pub optimize_pdf: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            orientation: DEFAULT_ORIENTATION.to_string(),
            preserve_formatting: true,
            optimize_pdf: true,
        }
    }
}

impl ConversionOptions {
    /// Build options from raw form values.
    ///
    /// Absent fields take their defaults. A boolean field that is present
    /// is true only when its value is exactly `"true"`.
    pub fn from_form(
        page_size: Option<String>,
        orientation: Option<String>,
        preserve_formatting: Option<&str>,
        optimize_pdf: Option<&str>,
    ) -> Self {
        Self {
            page_size: page_size.unwrap_or_else(|| DEFAULT_PAGE_SIZE.to_string()),
            orientation: orientation.unwrap_or_else(|| DEFAULT_ORIENTATION.to_string()),
            preserve_formatting: parse_flag(preserve_formatting),
            optimize_pdf: parse_flag(optimize_pdf),
        }
    }

    /// Command-line arguments for these options.
    ///
    /// Page size and orientation are always present; the boolean flags are
    /// emitted only when true, and their absence means false.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--page-size".to_string(),
            self.page_size.clone(),
            "--orientation".to_string(),
            self.orientation.clone(),
        ];
        if self.preserve_formatting {
            args.push("--preserve-formatting".to_string());
        }
        if self.optimize_pdf {
            args.push("--optimize".to_string());
        }
        args
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_none_or(|v| v == "true")
}

/// One converter invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionJob {
    /// Staged input document.
    pub input_path: PathBuf,
    /// Where the converter must write the PDF.
    pub output_path: PathBuf,
    /// Options forwarded to the converter.
    pub options: ConversionOptions,
}

impl ConversionJob {
    /// Full argument list: input and output first, then the options.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--input".to_string(),
            self.input_path.to_string_lossy().to_string(),
            "--output".to_string(),
            self.output_path.to_string_lossy().to_string(),
        ];
        args.extend(self.options.to_args());
        args
    }
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Path of the produced PDF.
    pub output_path: PathBuf,
    /// Size of the produced PDF in bytes.
    pub output_size: u64,
    /// Wall-clock duration of the invocation.
    pub duration_ms: u64,
    /// Captured standard output.
    pub stdout: String,
}
