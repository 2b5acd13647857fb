//! Text extraction backends and the document-to-CSV converter for paysheet
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         DocumentConverter                           │
//! │   (format detection, extraction, table building, CSV output)        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                    │
//!                                    ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          TextBackend Trait                          │
//! │  fn extract_bytes(&self, data: &[u8], ..) -> Result<String>         │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                    │
//!        ┌───────────────────────────┼───────────────────────────┐
//!        ▼                           ▼                           ▼
//! ┌─────────────┐             ┌─────────────┐             ┌─────────────┐
//! │ PdfBackend  │             │ DocxBackend │             │ DatBackend  │
//! │(pdf-extract)│             │ (zip + xml) │             │  (UTF-8)    │
//! └─────────────┘             └─────────────┘             └─────────────┘
//! ```
//!
//! Every backend yields one block of text: records separated by `\n`, fields
//! by `\t`. Table building and CSV output live in `paysheet-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use paysheet_backend::DocumentConverter;
//!
//! let report = DocumentConverter::new().convert_to_csv("DATA.dat", "output.csv")?;
//! println!("{} rows, {}", report.data_rows, report.trailer);
//! # Ok::<(), paysheet_core::PaysheetError>(())
//! ```

pub mod converter;
pub mod dat;
pub mod docx;
pub mod pdf;
pub mod traits;

pub use converter::{ConversionReport, DocumentConverter};
pub use dat::DatBackend;
pub use docx::DocxBackend;
pub use pdf::PdfBackend;
pub use traits::{BackendOptions, TextBackend};
