//! Error type for converter invocations.

use std::path::PathBuf;

use docpdf_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Maximum stderr characters kept in an error message.
pub const MAX_STDERR_CHARS: usize = 2000;

/// Everything that can go wrong while delegating a conversion.
///
/// The `Display` text is what the requester sees in the `error` field.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The converter exited with a non-zero status.
    #[error("Conversion failed: {}", failure_detail(.code, .stderr))]
    ProcessExecutionFailed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured (truncated) standard error.
        stderr: String,
    },

    /// The converter exited zero but wrote nothing at the output path.
    #[error("Conversion failed - no output file created")]
    NoOutputProduced {
        /// Expected output path.
        path: PathBuf,
    },

    /// The converter exited zero but the output file is empty.
    #[error("Conversion failed - output file is empty")]
    OutputEmpty {
        /// Path to the empty output file.
        path: PathBuf,
    },

    /// The executable could not be started at all.
    #[error("Failed to launch converter '{command}': {source}")]
    LaunchFailed {
        /// The configured command.
        command: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The converter did not finish within the configured bound.
    #[error("Conversion timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// Other I/O failure around the invocation.
    #[error("Conversion I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn failure_detail(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match *code {
        Some(code) => format!("converter exited with code {code}"),
        None => "converter was terminated by a signal".to_string(),
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        AppError::with_source(ErrorKind::Conversion, err.to_string(), err)
    }
}
