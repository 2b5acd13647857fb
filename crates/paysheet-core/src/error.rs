//! Error types for document-to-CSV conversion.
//!
//! Every structural failure aborts the conversion before anything is written.
//! Numeric coercion failures are not errors: they are collected as
//! [`CoercionWarning`] values on the enriched table instead.

use crate::format::InputFormat;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur while converting a document to CSV.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: DocumentConverter is in paysheet-backend crate
/// use paysheet_backend::DocumentConverter;
/// use paysheet_core::PaysheetError;
///
/// let converter = DocumentConverter::new();
///
/// match converter.convert_to_csv("DATA.dat", "out.csv") {
///     Ok(report) => println!("wrote {}", report.output.display()),
///     Err(PaysheetError::UnsupportedFormat(ext)) => eprintln!("Unsupported format: {ext}"),
///     Err(PaysheetError::MissingColumn(col)) => eprintln!("Missing column: {col}"),
///     Err(e) => eprintln!("Conversion failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum PaysheetError {
    /// File extension is not one of the recognized input formats.
    #[error("Unsupported document type: {0}")]
    UnsupportedFormat(String),

    /// The underlying document parser could not read the file.
    ///
    /// Covers corrupt files and files whose content does not match their
    /// extension.
    #[error("Failed to extract text from {format} document: {message}")]
    Extraction {
        /// Format the extractor was selected for
        format: InputFormat,
        /// Parser-specific failure description
        message: String,
    },

    /// Extraction succeeded but produced no text.
    #[error("Failed to extract text from the document: {0} extraction yielded no text")]
    EmptyText(InputFormat),

    /// The parsed table lacks a column the enrichment step needs.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A data line has a different field count than the heading row.
    ///
    /// `line` is 1-based and counts lines of the stripped text, heading included.
    #[error("Ragged row at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        /// 1-based line number
        line: usize,
        /// Heading width
        expected: usize,
        /// Fields found on the line
        found: usize,
    },

    /// The destination CSV could not be written.
    #[error("Failed to write CSV to {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Reading the input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An option value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Fieldless classification of [`PaysheetError`].
///
/// Stable across message changes, so callers can map it to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnsupportedFormat,
    Extraction,
    EmptyText,
    MissingColumn,
    RaggedRow,
    Write,
    Io,
    Config,
}

impl PaysheetError {
    /// Classify this error.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Extraction { .. } => ErrorKind::Extraction,
            Self::EmptyText(_) => ErrorKind::EmptyText,
            Self::MissingColumn(_) => ErrorKind::MissingColumn,
            Self::RaggedRow { .. } => ErrorKind::RaggedRow,
            Self::Write { .. } => ErrorKind::Write,
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Build an [`PaysheetError::Extraction`] from any displayable parser error.
    pub fn extraction(format: InputFormat, err: impl std::fmt::Display) -> Self {
        Self::Extraction {
            format,
            message: err.to_string(),
        }
    }
}

/// A value in a numeric column that could not be converted to a number.
///
/// The original string is kept in the table; this record only reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CoercionWarning {
    /// 0-based index into the deduplicated data rows
    pub row: usize,
    /// Column name
    pub column: String,
    /// The value left unconverted
    pub value: String,
}

impl std::fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}: column '{}' value {:?} is not numeric, kept as text",
            self.row + 1,
            self.column,
            self.value
        )
    }
}

/// Type alias for [`Result<T, PaysheetError>`].
pub type Result<T> = std::result::Result<T, PaysheetError>;
