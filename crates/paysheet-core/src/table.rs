//! Table builder
//!
//! Splits extracted text into a heading row and data rows, applies the ragged
//! row policy and removes exact duplicate rows.

use crate::error::{PaysheetError, Result};
use crate::options::{ConversionOptions, RaggedRowPolicy};
use serde::Serialize;
use std::collections::HashSet;

/// Ordered column names taken from the first line of the text
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct HeadingRow(pub Vec<String>);

impl HeadingRow {
    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the heading has no columns
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the first column named exactly `name`
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|col| col == name)
    }

    /// Column names
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// One data record, always exactly as wide as the heading row
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Row(pub Vec<String>);

impl Row {
    /// Field values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

/// Heading row plus data rows, before enrichment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub heading: HeadingRow,
    pub rows: Vec<Row>,
}

impl Table {
    /// Parse delimited text into a table
    ///
    /// The text is stripped, split on `\n` (a trailing `\r` on each line is
    /// dropped), the first line becomes the heading and every later non-blank
    /// line becomes a row.
    ///
    /// # Errors
    /// Returns [`PaysheetError::RaggedRow`] when a line's field count does not
    /// fit the heading under the configured [`RaggedRowPolicy`].
    pub fn parse(text: &str, options: &ConversionOptions) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }

        let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

        let heading = HeadingRow(
            lines
                .next()
                .unwrap_or_default()
                .split(options.delimiter)
                .map(str::to_string)
                .collect(),
        );
        let width = heading.len();

        let mut rows = Vec::new();
        // line 1 is the heading
        for (idx, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<String> = line.split(options.delimiter).map(str::to_string).collect();
            rows.push(normalize_width(fields, width, idx + 2, options.ragged_rows)?);
        }

        log::debug!("Parsed table: {} columns, {} rows", width, rows.len());

        Ok(Self { heading, rows })
    }

    /// Remove exact duplicate rows, keeping the first occurrence
    ///
    /// Returns the number of rows removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        let removed = before - self.rows.len();
        if removed > 0 {
            log::info!("Removed {removed} duplicate rows");
        }
        removed
    }

    /// Index of the first column named exactly `name`
    #[inline]
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.heading.position(name)
    }
}

fn normalize_width(
    mut fields: Vec<String>,
    width: usize,
    line: usize,
    policy: RaggedRowPolicy,
) -> Result<Row> {
    let found = fields.len();
    if found == width {
        return Ok(Row(fields));
    }

    let ragged = PaysheetError::RaggedRow {
        line,
        expected: width,
        found,
    };

    match policy {
        RaggedRowPolicy::Reject => return Err(ragged),
        RaggedRowPolicy::Pad if found > width => return Err(ragged),
        RaggedRowPolicy::Pad | RaggedRowPolicy::Truncate => {}
    }

    log::debug!("Line {line}: normalizing {found} fields to {width} ({policy})");
    fields.resize(width, String::new());
    Ok(Row(fields))
}
