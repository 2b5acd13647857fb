//! Document-to-CSV converter
//!
//! Linear pipeline: detect format, extract text, build the table, enrich it,
//! write CSV. Every structural step runs before the destination is touched,
//! so a failed conversion never leaves a CSV behind.

use crate::dat::DatBackend;
use crate::docx::DocxBackend;
use crate::pdf::PdfBackend;
use crate::traits::{BackendOptions, TextBackend};
use paysheet_core::{
    convert_text, CoercionWarning, ConversionOptions, CsvSerializer, EnrichedTable, InputFormat,
    PaysheetError, SummaryTrailer,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a successful [`DocumentConverter::convert_to_csv`] call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Source document
    pub input: PathBuf,
    /// CSV written
    pub output: PathBuf,
    /// Detected input format
    pub format: InputFormat,
    /// Data rows written (trailer excluded)
    pub data_rows: usize,
    /// Exact duplicate rows dropped
    pub duplicates_removed: usize,
    /// Values left as text in numeric columns
    pub warnings: Vec<CoercionWarning>,
    /// Summary written after the data rows
    pub trailer: SummaryTrailer,
    /// Wall time of the whole pipeline
    pub elapsed: Duration,
}

/// Converts PDF, DOCX and DAT payroll documents to CSV
#[derive(Debug, Clone, Default)]
pub struct DocumentConverter {
    options: ConversionOptions,
    backend_options: BackendOptions,
}

impl DocumentConverter {
    /// Create a converter with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with the given table options
    #[inline]
    #[must_use]
    pub fn with_options(options: ConversionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the extraction options
    #[inline]
    #[must_use = "returns a converter with the backend options applied"]
    pub fn with_backend_options(mut self, backend_options: BackendOptions) -> Self {
        self.backend_options = backend_options;
        self
    }

    /// Table options in effect
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Extraction options in effect
    #[inline]
    #[must_use]
    pub const fn backend_options(&self) -> &BackendOptions {
        &self.backend_options
    }

    /// Extract the plain text of a document
    ///
    /// # Errors
    /// - [`PaysheetError::UnsupportedFormat`] for an unrecognized extension
    /// - [`PaysheetError::Extraction`] if the file cannot be read or parsed
    /// - [`PaysheetError::EmptyText`] if the document holds only whitespace
    pub fn extract_text<P: AsRef<Path>>(&self, path: P) -> Result<(InputFormat, String), PaysheetError> {
        let path = path.as_ref();
        let format = InputFormat::from_path(path)?;

        log::debug!("Extracting {} text from {}", format, path.display());

        let text = match format {
            InputFormat::Pdf => PdfBackend::new().extract_file(path, &self.backend_options)?,
            InputFormat::Docx => DocxBackend::new().extract_file(path, &self.backend_options)?,
            InputFormat::Dat => DatBackend::new().extract_file(path, &self.backend_options)?,
        };

        if text.trim().is_empty() {
            return Err(PaysheetError::EmptyText(format));
        }

        Ok((format, text))
    }

    /// Extract a document and build its enriched table
    ///
    /// # Errors
    /// Any error of [`Self::extract_text`], plus [`PaysheetError::RaggedRow`]
    /// and [`PaysheetError::MissingColumn`] from table building.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<EnrichedTable, PaysheetError> {
        let (_, text) = self.extract_text(path)?;
        convert_text(&text, &self.options)
    }

    /// Convert `input` and write the result as CSV to `output`
    ///
    /// An existing file at `output` is replaced.
    ///
    /// # Errors
    /// Any error of [`Self::convert`], or [`PaysheetError::Write`] if the CSV
    /// cannot be written.
    pub fn convert_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, PaysheetError> {
        let input = input.as_ref();
        let output = output.as_ref();
        let start = Instant::now();

        let (format, text) = self.extract_text(input)?;
        let table = convert_text(&text, &self.options)?;

        CsvSerializer::new().write_file(&table, output)?;

        let elapsed = start.elapsed();
        log::info!(
            "Converted {} ({}) to {} in {:?}: {} rows, {} duplicates removed, {} warnings",
            input.display(),
            format,
            output.display(),
            elapsed,
            table.rows.len(),
            table.duplicates_removed,
            table.warnings.len()
        );

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            format,
            data_rows: table.rows.len(),
            duplicates_removed: table.duplicates_removed,
            warnings: table.warnings,
            trailer: table.trailer,
            elapsed,
        })
    }
}
