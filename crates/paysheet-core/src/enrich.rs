//! Salary enrichment
//!
//! Coerces numeric columns, derives the `Gross Salary` column and computes the
//! summary trailer (second highest and average gross salary).

// Row counts are far below f64's exact integer range.
#![allow(clippy::cast_precision_loss)]

use crate::cell::{round_to, Cell, Number};
use crate::error::{CoercionWarning, PaysheetError, Result};
use crate::options::ConversionOptions;
use crate::table::Table;
use serde::Serialize;
use std::fmt;

/// Record identifier column
pub const ID_COLUMN: &str = "id";
/// First Gross Salary operand
pub const BASIC_SALARY_COLUMN: &str = "basic_salary";
/// Second Gross Salary operand
pub const ALLOWANCES_COLUMN: &str = "allowances";
/// Derived column appended by [`enrich`]
pub const GROSS_SALARY_COLUMN: &str = "Gross Salary";

/// Decimal places kept for the average salary
pub const AVERAGE_DECIMALS: u32 = 2;

const REQUIRED_COLUMNS: [&str; 3] = [ID_COLUMN, BASIC_SALARY_COLUMN, ALLOWANCES_COLUMN];

/// Aggregates appended after all data rows
///
/// Kept apart from the data rows: it is not a row of the table's schema, it
/// only borrows the first two column slots when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTrailer {
    /// Gross Salary at rank 2 of a descending sort (ties count)
    pub second_highest: Option<Number>,
    /// Mean Gross Salary rounded to two decimals
    pub average: Option<f64>,
}

impl SummaryTrailer {
    /// Compute the trailer from the computable Gross Salary values
    #[must_use]
    pub fn from_gross(values: &[Number]) -> Self {
        if values.is_empty() {
            return Self {
                second_highest: None,
                average: None,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let second_highest = sorted.get(1).or_else(|| sorted.first()).copied();

        let sum: f64 = values.iter().map(|n| n.as_f64()).sum();
        let average = round_to(sum / values.len() as f64, AVERAGE_DECIMALS);

        Self {
            second_highest,
            average: Some(average),
        }
    }

    /// Text for the first column slot
    #[must_use]
    pub fn second_highest_label(&self) -> String {
        format!("Second Highest Salary={}", display_or_na(self.second_highest))
    }

    /// Text for the second column slot
    #[must_use]
    pub fn average_label(&self) -> String {
        format!("average salary = {}", display_or_na(self.average.map(Number::Float)))
    }
}

impl fmt::Display for SummaryTrailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.second_highest_label(), self.average_label())
    }
}

fn display_or_na(value: Option<Number>) -> String {
    value.map_or_else(|| "N/A".to_string(), |n| n.to_string())
}

/// Deduplicated, typed table with the derived column and the trailer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTable {
    /// Column names, `Gross Salary` included
    pub heading: Vec<String>,
    /// Data rows, each as wide as `heading`
    pub rows: Vec<Vec<Cell>>,
    /// Summary appended after the data rows
    pub trailer: SummaryTrailer,
    /// Values left unconverted in numeric columns
    pub warnings: Vec<CoercionWarning>,
    /// Rows dropped as exact duplicates
    pub duplicates_removed: usize,
}

/// Parse, deduplicate and enrich extracted text
///
/// # Errors
/// Returns [`PaysheetError::RaggedRow`] or [`PaysheetError::MissingColumn`].
pub fn convert_text(text: &str, options: &ConversionOptions) -> Result<EnrichedTable> {
    options.validate()?;
    let mut table = Table::parse(text, options)?;
    let duplicates_removed = table.dedup();
    let mut enriched = enrich(table, options)?;
    enriched.duplicates_removed = duplicates_removed;
    Ok(enriched)
}

/// Coerce numeric columns, derive Gross Salary and compute the trailer
///
/// Expects an already deduplicated table. Rows not matching the heading
/// width are padded with empty values or cut to it, as
/// [`RaggedRowPolicy::Truncate`](crate::options::RaggedRowPolicy::Truncate) does.
///
/// # Errors
/// Returns [`PaysheetError::MissingColumn`] when `id`, `basic_salary`,
/// `allowances` or a configured numeric column is absent, or when the heading
/// is too narrow to hold the two trailer labels.
pub fn enrich(table: Table, options: &ConversionOptions) -> Result<EnrichedTable> {
    let numeric_idx = numeric_column_indices(&table, options)?;
    if table.heading.len() < 2 {
        return Err(PaysheetError::MissingColumn(
            "heading row needs at least two columns for the summary labels".to_string(),
        ));
    }

    let basic_idx = required_index(&table, BASIC_SALARY_COLUMN)?;
    let allowances_idx = required_index(&table, ALLOWANCES_COLUMN)?;

    let width = table.heading.len();
    let mut heading = table.heading.0;
    let gross_idx = heading.iter().position(|c| c == GROSS_SALARY_COLUMN);
    if gross_idx.is_none() {
        heading.push(GROSS_SALARY_COLUMN.to_string());
    }

    let mut warnings = Vec::new();
    let mut gross_values = Vec::with_capacity(table.rows.len());
    let mut rows = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.into_iter().enumerate() {
        let mut values = row.0;
        values.resize(width, String::new());

        let mut cells: Vec<Cell> = values
            .into_iter()
            .enumerate()
            .map(|(col_idx, value)| {
                if !numeric_idx.contains(&col_idx) {
                    return Cell::Text(value);
                }
                Number::parse(&value).map_or_else(
                    || {
                        let warning = CoercionWarning {
                            row: row_idx,
                            column: heading[col_idx].clone(),
                            value: value.clone(),
                        };
                        log::debug!("{warning}");
                        warnings.push(warning);
                        Cell::Text(value)
                    },
                    Cell::Number,
                )
            })
            .collect();

        let gross = match (cells[basic_idx].as_number(), cells[allowances_idx].as_number()) {
            (Some(basic), Some(allowances)) => {
                let sum = basic.add(allowances);
                gross_values.push(sum);
                Cell::Number(sum)
            }
            _ => Cell::NotComputable,
        };

        match gross_idx {
            Some(idx) => cells[idx] = gross,
            None => cells.push(gross),
        }
        rows.push(cells);
    }

    let trailer = SummaryTrailer::from_gross(&gross_values);
    log::info!(
        "Enriched {} rows ({} with computable gross salary), {}",
        rows.len(),
        gross_values.len(),
        trailer
    );

    Ok(EnrichedTable {
        heading,
        rows,
        trailer,
        warnings,
        duplicates_removed: 0,
    })
}

fn required_index(table: &Table, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| PaysheetError::MissingColumn(name.to_string()))
}

/// Indices of required and configured numeric columns, in heading order
fn numeric_column_indices(table: &Table, options: &ConversionOptions) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    let names = REQUIRED_COLUMNS
        .iter()
        .copied()
        .chain(options.numeric_columns.iter().map(String::as_str));

    for name in names {
        let idx = required_index(table, name)?;
        if !indices.contains(&idx) {
            indices.push(idx);
        }
    }
    indices.sort_unstable();
    Ok(indices)
}
