//! Multipart form fields of `POST /api/convert`.

/// The file part.
pub const FIELD_FILE: &str = "file";
/// Page size, e.g. `A4` or `Letter`.
pub const FIELD_PAGE_SIZE: &str = "pageSize";
/// `Portrait` or `Landscape`.
pub const FIELD_ORIENTATION: &str = "orientation";
/// `"true"` to keep source formatting.
pub const FIELD_PRESERVE_FORMATTING: &str = "preserveFormatting";
/// `"true"` to optimize the PDF.
pub const FIELD_OPTIMIZE_PDF: &str = "optimizePDF";

/// Text fields of a convert form, as received.
#[derive(Debug, Clone, Default)]
pub struct ConvertForm {
    /// Raw `pageSize` value.
    pub page_size: Option<String>,
    /// Raw `orientation` value.
    pub orientation: Option<String>,
    /// Raw `preserveFormatting` value; only `"true"` enables it.
    pub preserve_formatting: Option<String>,
    /// Raw `optimizePDF` value; only `"true"` enables it.
    pub optimize_pdf: Option<String>,
}

impl ConvertForm {
    /// Store a text field; returns `false` for names this form does not use.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            FIELD_PAGE_SIZE => &mut self.page_size,
            FIELD_ORIENTATION => &mut self.orientation,
            FIELD_PRESERVE_FORMATTING => &mut self.preserve_formatting,
            FIELD_OPTIMIZE_PDF => &mut self.optimize_pdf,
            _ => return false,
        };
        // First occurrence wins.
        if slot.is_none() {
            *slot = Some(value);
        }
        true
    }

    /// Whether `name` is one of the text fields.
    pub fn accepts(name: &str) -> bool {
        matches!(
            name,
            FIELD_PAGE_SIZE | FIELD_ORIENTATION | FIELD_PRESERVE_FORMATTING | FIELD_OPTIMIZE_PDF
        )
    }
}
