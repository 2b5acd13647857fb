//! Conversion options
//!
//! All behaviour that used to be a process-wide default is carried here and
//! passed explicitly to the table builder and enricher.

use crate::error::{PaysheetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default field delimiter inside a line of extracted text
pub const DEFAULT_DELIMITER: char = '\t';

/// Columns coerced to numbers by default
pub const DEFAULT_NUMERIC_COLUMNS: [&str; 3] = ["id", "basic_salary", "allowances"];

/// How to treat a data line whose field count differs from the heading row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRowPolicy {
    /// Pad short rows with empty cells, reject long rows
    #[default]
    Pad,
    /// Pad short rows, drop trailing fields of long rows
    Truncate,
    /// Any mismatch is an error
    Reject,
}

impl FromStr for RaggedRowPolicy {
    type Err = PaysheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pad" => Ok(Self::Pad),
            "truncate" => Ok(Self::Truncate),
            "reject" => Ok(Self::Reject),
            other => Err(PaysheetError::Config(format!(
                "unknown ragged row policy '{other}' (expected pad, truncate or reject)"
            ))),
        }
    }
}

impl fmt::Display for RaggedRowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pad => "pad",
            Self::Truncate => "truncate",
            Self::Reject => "reject",
        })
    }
}

/// Options for parsing and enriching extracted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Field delimiter within a line
    pub delimiter: char,

    /// Columns to coerce to numbers
    ///
    /// `id`, `basic_salary` and `allowances` are always required and coerced
    /// regardless of this list.
    pub numeric_columns: Vec<String>,

    /// Ragged row handling
    pub ragged_rows: RaggedRowPolicy,
}

impl ConversionOptions {
    /// Set the field delimiter
    #[inline]
    #[must_use = "returns options with delimiter configured"]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the set of numeric columns
    #[must_use = "returns options with numeric columns configured"]
    pub fn with_numeric_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ragged row policy
    #[inline]
    #[must_use = "returns options with ragged row policy configured"]
    pub const fn with_ragged_rows(mut self, policy: RaggedRowPolicy) -> Self {
        self.ragged_rows = policy;
        self
    }

    /// Check option values for consistency
    ///
    /// # Errors
    /// Returns [`PaysheetError::Config`] for a newline delimiter.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(PaysheetError::Config(
                "field delimiter cannot be a line break".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConversionOptions {
    #[inline]
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            numeric_columns: DEFAULT_NUMERIC_COLUMNS.iter().map(|s| (*s).to_string()).collect(),
            ragged_rows: RaggedRowPolicy::default(),
        }
    }
}
