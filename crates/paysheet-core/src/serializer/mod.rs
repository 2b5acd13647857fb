//! Table serialization module
//!
//! This module provides the serializer that writes enriched tables to disk.

pub mod csv;

pub use self::csv::{CsvOptions, CsvSerializer};
