//! Input format types for document conversion
//!
//! This module defines the `InputFormat` enum which represents the document
//! formats paysheet can extract tabular text from.

use crate::error::{PaysheetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Flat file already structured as tab/newline delimited text (.dat)
    Dat,
}

impl InputFormat {
    /// All supported formats, in dispatch order
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Docx, Self::Dat];

    /// Detect format from a file extension (case-insensitive, leading dot optional)
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "dat" => Some(Self::Dat),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    ///
    /// # Errors
    /// Returns [`PaysheetError::UnsupportedFormat`] if the path has no extension
    /// or the extension is not recognized.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                PaysheetError::UnsupportedFormat(format!(
                    "no file extension found: {}",
                    path.display()
                ))
            })?;

        Self::from_extension(ext).ok_or_else(|| PaysheetError::UnsupportedFormat(format!(".{ext}")))
    }

    /// File extensions recognized for this format
    #[inline]
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Docx => &["docx"],
            Self::Dat => &["dat"],
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Dat => "DAT",
        };
        f.write_str(name)
    }
}
