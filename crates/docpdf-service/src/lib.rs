//! # docpdf-service
//!
//! The conversion request lifecycle:
//!
//! 1. [`upload::UploadValidator`] checks presence and extension of the upload
//!    and sanitizes its filename.
//! 2. [`staging::StagingArea`] writes it under `{uuid}_{filename}`.
//! 3. [`conversion::ConversionService`] hands the staged file to a
//!    [`docpdf_converter::DocumentConverter`] and always removes the staged
//!    input afterwards.
//! 4. [`download::DownloadService`] serves each output exactly once.
//!
//! The only state shared between the convert and download steps is the
//! output file itself, addressed by a [`reference::DownloadReference`].

pub mod conversion;
pub mod download;
pub mod reference;
pub mod staging;
pub mod upload;

pub use conversion::{ConversionOutcome, ConversionRequest, ConversionService};
pub use download::{DownloadResult, DownloadService};
pub use reference::DownloadReference;
pub use staging::{StagedInput, StagingArea};
pub use upload::{UploadError, UploadValidator, UploadedFile, ValidatedUpload};
