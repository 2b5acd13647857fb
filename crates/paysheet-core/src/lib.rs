//! # Paysheet Core - Payroll Table Library
//!
//! Turns tab/newline structured text (as extracted from a PDF, DOCX or DAT
//! file) into a deduplicated table with a derived `Gross Salary` column and a
//! summary trailer, and writes it as CSV.
//!
//! ## Quick Start
//!
//! ```rust
//! use paysheet_core::{convert_text, ConversionOptions, CsvSerializer};
//!
//! let text = "id\tbasic_salary\tallowances\n1\t1000\t200\n2\t1500\t300\n";
//! let table = convert_text(text, &ConversionOptions::default()).unwrap();
//!
//! let csv = CsvSerializer::new().to_string(&table).unwrap();
//! assert_eq!(
//!     csv,
//!     "id,basic_salary,allowances,Gross Salary\n\
//!      1,1000,200,1200\n\
//!      2,1500,300,1800\n\
//!      Second Highest Salary=1200,average salary = 1500.0,,\n"
//! );
//! ```
//!
//! ## Module Organization
//!
//! - `DocumentConverter` (in `paysheet-backend` crate) - extraction and the full pipeline
//! - [`table`] - heading/row parsing and deduplication
//! - [`enrich`] - numeric coercion, Gross Salary and the summary trailer
//! - [`cell`] - typed cell values
//! - [`serializer`] - CSV output
//! - [`mod@format`] - input format detection
//! - [`options`] - conversion options
//! - [`error`] - error types

pub mod cell;
pub mod enrich;
pub mod error;
pub mod format;
pub mod options;
pub mod serializer;
pub mod table;

// Re-exports for convenience
pub use cell::{Cell, Number};
pub use enrich::{convert_text, enrich, EnrichedTable, SummaryTrailer};
pub use error::*;
pub use format::InputFormat;
pub use options::{ConversionOptions, RaggedRowPolicy};
pub use serializer::{CsvOptions, CsvSerializer};
pub use table::{HeadingRow, Row, Table};
