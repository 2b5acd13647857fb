//! CSV serialization for enriched tables
//!
//! Writes the heading row (Gross Salary included), every data row in table
//! order, then the summary trailer in the first two column slots. No index
//! column is written.

use crate::enrich::EnrichedTable;
use crate::error::{PaysheetError, Result};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Options for CSV serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CsvOptions {
    /// Field separator (default: `,`)
    pub delimiter: u8,
}

impl Default for CsvOptions {
    #[inline]
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// CSV serializer for [`EnrichedTable`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CsvSerializer {
    options: CsvOptions,
}

impl CsvSerializer {
    /// Create a new CSV serializer with default options
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new CSV serializer with custom options
    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Write the table as CSV to any writer
    ///
    /// # Errors
    /// Returns the underlying I/O error if writing fails.
    pub fn to_writer<W: Write>(&self, table: &EnrichedTable, writer: W) -> io::Result<()> {
        let mut wtr = ::csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .terminator(::csv::Terminator::Any(b'\n'))
            .flexible(false)
            .from_writer(writer);

        let width = table.heading.len();
        wtr.write_record(&table.heading)?;

        let mut record: Vec<String> = Vec::with_capacity(width);
        for row in &table.rows {
            record.clear();
            record.extend(row.iter().map(ToString::to_string));
            wtr.write_record(&record)?;
        }

        record.clear();
        record.push(table.trailer.second_highest_label());
        record.push(table.trailer.average_label());
        record.resize(width.max(2), String::new());
        wtr.write_record(&record)?;

        wtr.flush()
    }

    /// Serialize the table to a CSV string
    ///
    /// # Errors
    /// Returns an error if the CSV writer fails.
    pub fn to_string(&self, table: &EnrichedTable) -> io::Result<String> {
        let mut buf = Vec::new();
        self.to_writer(table, &mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the table to `path`
    ///
    /// Content goes to a temporary file in the destination directory first and
    /// is renamed over `path` only once fully written, so a failure never
    /// leaves a partial CSV behind.
    ///
    /// # Errors
    /// Returns [`PaysheetError::Write`] if the destination is not writable.
    pub fn write_file(&self, table: &EnrichedTable, path: &Path) -> Result<()> {
        let write_err = |source: io::Error| PaysheetError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        self.to_writer(table, io::BufWriter::new(tmp.as_file_mut()))
            .map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        log::info!("Wrote {} data rows to {}", table.rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, Number};
    use crate::enrich::{convert_text, SummaryTrailer};
    use crate::options::ConversionOptions;

    fn sample() -> EnrichedTable {
        convert_text(
            "id\tbasic_salary\tallowances\n1\t1000\t200\n2\t1500\t300\n",
            &ConversionOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_sample_output() {
        let csv = CsvSerializer::new().to_string(&sample()).unwrap();
        assert_eq!(
            csv,
            "id,basic_salary,allowances,Gross Salary\n\
             1,1000,200,1200\n\
             2,1500,300,1800\n\
             Second Highest Salary=1200,average salary = 1500.0,,\n"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let table = EnrichedTable {
            heading: vec!["name".to_string(), "note".to_string()],
            rows: vec![vec![
                Cell::Text("Doe, Jane".to_string()),
                Cell::Text("said \"hi\"".to_string()),
            ]],
            trailer: SummaryTrailer::from_gross(&[Number::Int(1)]),
            warnings: Vec::new(),
            duplicates_removed: 0,
        };

        let csv = CsvSerializer::new().to_string(&table).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "\"Doe, Jane\",\"said \"\"hi\"\"\"");
    }

    #[test]
    fn test_not_computable_is_empty_field() {
        let table = convert_text(
            "id\tbasic_salary\tallowances\n1\tabc\t200\n",
            &ConversionOptions::default(),
        )
        .unwrap();
        let csv = CsvSerializer::new().to_string(&table).unwrap();
        assert_eq!(csv.lines().nth(1), Some("1,abc,200,"));
        assert_eq!(
            csv.lines().nth(2),
            Some("Second Highest Salary=N/A,average salary = N/A,,")
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let serializer = CsvSerializer::with_options(CsvOptions { delimiter: b';' });
        let csv = serializer.to_string(&sample()).unwrap();
        assert!(csv.starts_with("id;basic_salary;allowances;Gross Salary\n"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        CsvSerializer::new().write_file(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("id,basic_salary,allowances,Gross Salary\n"));
        assert_eq!(written.lines().count(), 4);
        // only the destination file remains
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old content").unwrap();

        CsvSerializer::new().write_file(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("old content"));
    }

    #[test]
    fn test_write_file_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = CsvSerializer::new().write_file(&sample(), &path).unwrap_err();

        assert!(matches!(err, PaysheetError::Write { .. }));
        assert!(!path.exists());
    }
}
