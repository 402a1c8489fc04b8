//! Content-type classification
//!
//! Decides how an entry listed from Drive is handled: recursed into,
//! downloaded byte-for-byte, exported to an OOXML format, or skipped.

use super::errors::CopyError;

/// Content type Drive uses for folders
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Native Google Docs document
pub const GOOGLE_DOCUMENT: &str = "application/vnd.google-apps.document";
/// Native Google Sheets spreadsheet
pub const GOOGLE_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
/// Native Google Slides presentation
pub const GOOGLE_PRESENTATION: &str = "application/vnd.google-apps.presentation";

/// Word-processing interchange format (`.docx`)
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
/// Spreadsheet interchange format (`.xlsx`)
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Presentation interchange format (`.pptx`)
pub const PPTX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Page-description format downloaded as-is
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Raster image formats downloaded as-is
pub const IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/tiff",
    "image/webp",
];

/// How an entry is processed by the tree walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// A folder: recursed into (or skipped in flat mode)
    Folder,
    /// A binary file downloaded byte-for-byte
    NativeBinary,
    /// A native Google document exported to the given content type
    Exportable(&'static str),
    /// Anything else; skipped with a log line
    Unsupported,
}

impl Handling {
    /// Returns true if this entry produces an upload
    pub fn is_transferable(&self) -> bool {
        matches!(self, Handling::NativeBinary | Handling::Exportable(_))
    }
}

/// Classifies a Drive content type
pub fn classify(content_type: &str) -> Handling {
    if content_type == FOLDER_MIME_TYPE {
        return Handling::Folder;
    }

    if content_type == PDF_MIME_TYPE || IMAGE_MIME_TYPES.iter().any(|t| *t == content_type) {
        return Handling::NativeBinary;
    }

    match export_mime_type(content_type) {
        Ok(target) => Handling::Exportable(target),
        Err(_) => Handling::Unsupported,
    }
}

/// Returns the export target for a native Google document type
///
/// # Errors
/// Returns [`CopyError::UnsupportedExportType`] for any content type other
/// than the Docs, Sheets and Slides sentinels.
pub fn export_mime_type(content_type: &str) -> Result<&'static str, CopyError> {
    match content_type {
        GOOGLE_DOCUMENT => Ok(DOCX_MIME_TYPE),
        GOOGLE_SPREADSHEET => Ok(XLSX_MIME_TYPE),
        GOOGLE_PRESENTATION => Ok(PPTX_MIME_TYPE),
        other => Err(CopyError::UnsupportedExportType(other.to_string())),
    }
}
