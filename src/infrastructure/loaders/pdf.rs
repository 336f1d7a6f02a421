//! PDF loader

use std::path::Path;

use crate::domain::{DocumentLoader, FileType, RagError};

/// Loader for PDF files, extracting embedded text via `pdf-extract`.
///
/// Scanned PDFs without a text layer yield little or no text; such files
/// end up rejected as empty documents downstream.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn file_type(&self) -> FileType {
        FileType::Pdf
    }

    fn load(&self, path: &Path) -> Result<Vec<String>, RagError> {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| RagError::document_read(path.to_string_lossy(), e.to_string()))?;

        Ok(vec![text])
    }
}
