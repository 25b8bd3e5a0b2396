//! # docpdf-converter
//!
//! Delegates Word-to-PDF conversion to an external executable.
//!
//! The executable is an opaque collaborator with a small contract: it is
//! launched with `--input`, `--output`, `--page-size` and `--orientation`
//! (plus `--preserve-formatting` / `--optimize` only when enabled), writes
//! the PDF to the output path and exits zero, or writes diagnostics to
//! stderr and exits non-zero.
//!
//! [`DocumentConverter`] is the seam the rest of the workspace depends on;
//! [`ProcessConverter`] is the production implementation.

pub mod converter;
pub mod error;
pub mod executor;
pub mod models;

pub use converter::DocumentConverter;
pub use error::ConversionError;
pub use executor::ProcessConverter;
pub use models::{ConversionJob, ConversionOptions, ConversionReport};
