//! DAT (plain text) extraction
//!
//! DAT files already hold tab-delimited lines, so extraction is decoding only.

use crate::traits::{BackendOptions, TextBackend};
use paysheet_core::{InputFormat, PaysheetError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// DAT Text Backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DatBackend;

impl DatBackend {
    /// Create a new DAT backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for extraction"]
    pub const fn new() -> Self {
        Self
    }
}

impl TextBackend for DatBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Dat
    }

    fn extract_bytes(&self, data: &[u8], _options: &BackendOptions) -> Result<String, PaysheetError> {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

        match std::str::from_utf8(data) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => {
                log::warn!("DAT file is not valid UTF-8 ({e}), decoding lossily");
                Ok(String::from_utf8_lossy(data).into_owned())
            }
        }
    }
}
