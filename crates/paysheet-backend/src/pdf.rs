//! PDF text extraction
//!
//! Uses `pdf-extract` (pure Rust, built on lopdf). Page texts are
//! concatenated in document order; page boundaries are not marked.

use crate::traits::{BackendOptions, TextBackend};
use paysheet_core::{InputFormat, PaysheetError};

/// PDF Text Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PdfBackend;

impl PdfBackend {
    /// Create a new PDF backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for extraction"]
    pub const fn new() -> Self {
        Self
    }
}

impl TextBackend for PdfBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Pdf
    }

    fn extract_bytes(&self, data: &[u8], _options: &BackendOptions) -> Result<String, PaysheetError> {
        // pdf_extract can panic on malformed PDFs
        let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data));

        match result {
            Ok(Ok(text)) => {
                log::debug!("PDF extracted with pdf_extract: {} chars", text.len());
                Ok(text)
            }
            Ok(Err(e)) => Err(PaysheetError::extraction(InputFormat::Pdf, e)),
            Err(_) => Err(PaysheetError::extraction(
                InputFormat::Pdf,
                "parser panicked (malformed PDF)",
            )),
        }
    }
}
