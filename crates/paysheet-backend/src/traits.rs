//! Core trait definitions for text extraction backends

use paysheet_core::{InputFormat, PaysheetError};
use std::path::Path;

/// Options for backend processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BackendOptions {
    /// Emit DOCX table rows as tab-delimited lines
    ///
    /// Off by default: only body paragraphs are extracted, one per line.
    pub include_docx_tables: bool,
}

impl BackendOptions {
    /// Create options with DOCX table extraction
    #[inline]
    #[must_use = "returns options with DOCX table setting configured"]
    pub const fn with_docx_tables(mut self, enable: bool) -> Self {
        self.include_docx_tables = enable;
        self
    }
}

/// Main trait for text extraction backends
///
/// Each backend (PDF, DOCX, DAT) turns a document into one block of plain
/// text: records separated by newlines, fields by tab characters.
pub trait TextBackend: Send + Sync {
    /// Get the format this backend handles
    fn format(&self) -> InputFormat;

    /// Extract text from document bytes
    ///
    /// # Errors
    /// Returns [`PaysheetError::Extraction`] if the bytes cannot be parsed.
    fn extract_bytes(&self, data: &[u8], options: &BackendOptions) -> Result<String, PaysheetError>;

    /// Extract text from a file path
    ///
    /// The file handle is released before parsing starts.
    ///
    /// # Errors
    /// Returns an error if file reading or parsing fails.
    fn extract_file<P: AsRef<Path>>(
        &self,
        path: P,
        options: &BackendOptions,
    ) -> Result<String, PaysheetError> {
        let data = std::fs::read(path.as_ref()).map_err(|e| PaysheetError::extraction(self.format(), e))?;
        self.extract_bytes(&data, options)
    }

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: InputFormat) -> bool {
        self.format() == format
    }
}
