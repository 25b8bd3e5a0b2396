//! Upload validation and filename sanitization.

use bytes::Bytes;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use docpdf_core::error::AppError;

/// Maximum characters kept from a sanitized name component.
pub const MAX_COMPONENT_CHARS: usize = 200;

/// Extension of every converter output.
const OUTPUT_EXTENSION: &str = "pdf";

/// Stem used when nothing survives sanitization.
const FALLBACK_STEM: &str = "document";

/// A file part as received from the requester.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename claimed by the client, unsanitized.
    pub file_name: String,
    /// File content bytes.
    pub data: Bytes,
}

/// Reasons an upload is rejected before any filesystem work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The request carried no file part.
    #[error("No file uploaded")]
    MissingFile,
    /// The file part had an empty filename.
    #[error("No selected file")]
    EmptyFilename,
    /// The extension is not in the allowed set.
    #[error("Invalid file type")]
    UnsupportedExtension {
        /// The rejected extension, if the name had one.
        extension: Option<String>,
    },
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// An upload that passed validation, with its sanitized name.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Name as the client sent it.
    pub original_name: String,
    /// Sanitized stem, never empty.
    pub stem: String,
    /// Sanitized extension, as sent (not lowercased).
    pub extension: String,
    /// File content bytes.
    pub data: Bytes,
}

impl ValidatedUpload {
    /// Sanitized `stem.extension`, safe to join onto a directory.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }

    /// Name of the PDF the converter should produce.
    pub fn output_file_name(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.stem)
    }
}

/// Checks file presence and extension.
///
/// No content sniffing is done; a `.docx` containing anything is accepted.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    /// Lowercased allowed extensions.
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    /// Create a validator for the given extensions (case-insensitive).
    pub fn new<S: AsRef<str>>(allowed_extensions: &[S]) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether `file_name` ends in an allowed extension.
    pub fn is_allowed(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.allowed_extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Validate an optional file part.
    pub fn validate(&self, file: Option<UploadedFile>) -> Result<ValidatedUpload, UploadError> {
        let file = file.ok_or(UploadError::MissingFile)?;

        if file.file_name.is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        let (raw_stem, raw_ext) = match file.file_name.rsplit_once('.') {
            Some(parts) if self.is_allowed(&file.file_name) => parts,
            Some((_, ext)) => {
                return Err(UploadError::UnsupportedExtension {
                    extension: Some(ext.to_string()),
                });
            }
            None => return Err(UploadError::UnsupportedExtension { extension: None }),
        };

        let extension = sanitize_filename(raw_ext);

        // Both `stem.ext` and `stem.pdf` must stay within one component.
        let suffix_len = 1 + extension.len().max(OUTPUT_EXTENSION.len());
        let stem = sanitize_filename(raw_stem);
        let stem = truncate_component(&stem, MAX_COMPONENT_CHARS.saturating_sub(suffix_len));
        let stem = if stem.is_empty() {
            FALLBACK_STEM.to_string()
        } else {
            stem
        };

        Ok(ValidatedUpload {
            original_name: file.file_name.clone(),
            stem,
            extension,
            data: file.data,
        })
    }
}

/// Reduce a client-supplied name to a safe single path component.
///
/// The name is NFKD-decomposed first so accented letters keep their
/// ASCII base (`é` becomes `e`). Path separators become spaces, whitespace
/// runs (including control whitespace) collapse to `_`, anything other
/// than ASCII alphanumerics and `-_.` is dropped, and leading/trailing
/// `.`/`_` are trimmed. The result may be empty.
pub fn sanitize_filename(raw: &str) -> String {
    let separated: String = raw
        .nfkd()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .take(MAX_COMPONENT_CHARS)
        .collect();

    filtered.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Cut an already sanitized name to `max` characters, re-trimming the end.
fn truncate_component(name: &str, max: usize) -> String {
    let cut: String = name.chars().take(max).collect();
    cut.trim_end_matches(|c| c == '.' || c == '_').to_string()
}
