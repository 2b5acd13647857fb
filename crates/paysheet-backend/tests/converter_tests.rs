//! End-to-end conversion tests
//!
//! Runs `DocumentConverter` on DAT and DOCX files written to a scratch
//! directory and checks the exact CSV produced.

use paysheet_backend::{BackendOptions, DocumentConverter};
use paysheet_core::{ConversionOptions, InputFormat, Number, PaysheetError, RaggedRowPolicy};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const SAMPLE_TEXT: &str = "id\tbasic_salary\tallowances\n1\t1000\t200\n2\t1500\t300\n";
const SAMPLE_CSV: &str = "id,basic_salary,allowances,Gross Salary\n\
                          1,1000,200,1200\n\
                          2,1500,300,1800\n\
                          Second Highest Salary=1200,average salary = 1500.0,,\n";

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Build a minimal DOCX holding one paragraph per line, runs split on tabs
fn write_docx(dir: &TempDir, name: &str, lines: &[&str], table: Option<&[&[&str]]>) -> PathBuf {
    let mut body = String::new();
    for line in lines {
        body.push_str("<w:p>");
        for (i, field) in line.split('\t').enumerate() {
            body.push_str("<w:r>");
            if i > 0 {
                body.push_str("<w:tab/>");
            }
            body.push_str(&format!(r#"<w:t xml:space="preserve">{field}</w:t></w:r>"#));
        }
        body.push_str("</w:p>");
    }
    if let Some(rows) = table {
        body.push_str("<w:tbl>");
        for row in rows {
            body.push_str("<w:tr>");
            for cell in *row {
                body.push_str(&format!("<w:tc><w:p><w:r><w:t>{cell}</w:t></w:r></w:p></w:tc>"));
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let path = dir.path().join(name);
    let file = fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// ============================================================================
// DAT
// ============================================================================

#[test]
fn test_dat_sample_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "DATA.dat", SAMPLE_TEXT.as_bytes());
    let output = dir.path().join("output.csv");

    let report = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap();

    assert_eq!(read(&output), SAMPLE_CSV);
    assert_eq!(report.format, InputFormat::Dat);
    assert_eq!(report.data_rows, 2);
    assert_eq!(report.duplicates_removed, 0);
    assert!(report.warnings.is_empty());
    assert_eq!(report.trailer.second_highest, Some(Number::Int(1200)));
    assert_eq!(report.trailer.average, Some(1500.0));
    assert_eq!(report.output, output);
}

#[test]
fn test_dat_duplicates_and_blank_lines() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "dups.dat",
        b"\n  id\tbasic_salary\tallowances\n1\t1000\t200\n\n1\t1000\t200\n3\t2000\t0\n  \n",
    );
    let output = dir.path().join("dups.csv");

    let report = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap();

    assert_eq!(report.data_rows, 2);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(
        read(&output),
        "id,basic_salary,allowances,Gross Salary\n\
         1,1000,200,1200\n\
         3,2000,0,2000\n\
         Second Highest Salary=1200,average salary = 1600.0,,\n"
    );
}

#[test]
fn test_dat_crlf_matches_lf() {
    let dir = TempDir::new().unwrap();
    let lf = write_file(&dir, "lf.dat", SAMPLE_TEXT.as_bytes());
    let crlf = write_file(&dir, "crlf.dat", SAMPLE_TEXT.replace('\n', "\r\n").as_bytes());

    let converter = DocumentConverter::new();
    assert_eq!(converter.convert(&lf).unwrap(), converter.convert(&crlf).unwrap());
}

#[test]
fn test_non_numeric_allowances() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "mixed.dat",
        b"id\tbasic_salary\tallowances\n1\t1000\t200\n2\t1500\tn/a\n3\t900\t100\n",
    );
    let output = dir.path().join("mixed.csv");

    let report = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].column, "allowances");
    assert_eq!(report.warnings[0].value, "n/a");
    assert_eq!(
        read(&output),
        "id,basic_salary,allowances,Gross Salary\n\
         1,1000,200,1200\n\
         2,1500,n/a,\n\
         3,900,100,1000\n\
         Second Highest Salary=1000,average salary = 1100.0,,\n"
    );
}

#[test]
fn test_converting_twice_is_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "DATA.dat", SAMPLE_TEXT.as_bytes());
    let output = dir.path().join("output.csv");
    let converter = DocumentConverter::new();

    converter.convert_to_csv(&input, &output).unwrap();
    let first = read(&output);
    converter.convert_to_csv(&input, &output).unwrap();
    assert_eq!(read(&output), first);
}

#[test]
fn test_custom_delimiter() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "semi.dat", SAMPLE_TEXT.replace('\t', ";").as_bytes());
    let output = dir.path().join("semi.csv");

    DocumentConverter::with_options(ConversionOptions::default().with_delimiter(';'))
        .convert_to_csv(&input, &output)
        .unwrap();
    assert_eq!(read(&output), SAMPLE_CSV);
}

// ============================================================================
// DOCX
// ============================================================================

#[test]
fn test_docx_matches_dat() {
    let dir = TempDir::new().unwrap();
    let docx = write_docx(
        &dir,
        "DATA.docx",
        &["id\tbasic_salary\tallowances", "1\t1000\t200", "2\t1500\t300"],
        None,
    );
    let output = dir.path().join("from_docx.csv");

    let report = DocumentConverter::new()
        .convert_to_csv(&docx, &output)
        .unwrap();
    assert_eq!(report.format, InputFormat::Docx);
    assert_eq!(read(&output), SAMPLE_CSV);
}

#[test]
fn test_docx_table_rows_only_with_option() {
    let dir = TempDir::new().unwrap();
    let rows: &[&[&str]] = &[
        &["id", "basic_salary", "allowances"],
        &["1", "1000", "200"],
        &["2", "1500", "300"],
    ];
    let docx = write_docx(&dir, "table.docx", &[], Some(rows));

    let err = DocumentConverter::new().extract_text(&docx).unwrap_err();
    assert!(matches!(err, PaysheetError::EmptyText(InputFormat::Docx)));

    let output = dir.path().join("table.csv");
    DocumentConverter::new()
        .with_backend_options(BackendOptions::default().with_docx_tables(true))
        .convert_to_csv(&docx, &output)
        .unwrap();
    assert_eq!(read(&output), SAMPLE_CSV);
}

#[test]
fn test_corrupt_docx_is_extraction_error() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "broken.docx", SAMPLE_TEXT.as_bytes());
    let output = dir.path().join("broken.csv");

    let err = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap_err();
    assert!(matches!(
        err,
        PaysheetError::Extraction {
            format: InputFormat::Docx,
            ..
        }
    ));
    assert!(!output.exists());
}

// ============================================================================
// Failures write nothing
// ============================================================================

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "DATA.txt", SAMPLE_TEXT.as_bytes());
    let output = dir.path().join("output.csv");

    let err = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap_err();
    assert!(matches!(err, PaysheetError::UnsupportedFormat(ref ext) if ext == ".txt"));
    assert!(!output.exists());
}

#[test]
fn test_empty_dat_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "empty.dat", b"  \n\t\n");
    let output = dir.path().join("output.csv");

    let err = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap_err();
    assert!(matches!(err, PaysheetError::EmptyText(InputFormat::Dat)));
    assert!(!output.exists());
}

#[test]
fn test_missing_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "nocol.dat", b"id\tbasic_salary\n1\t1000\n");
    let output = dir.path().join("output.csv");

    let err = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap_err();
    assert!(matches!(err, PaysheetError::MissingColumn(ref c) if c == "allowances"));
    assert!(!output.exists());
}

#[test]
fn test_rejected_ragged_row_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "ragged.dat", b"id\tbasic_salary\tallowances\n1\t1000\n");
    let output = dir.path().join("output.csv");

    let err = DocumentConverter::with_options(
        ConversionOptions::default().with_ragged_rows(RaggedRowPolicy::Reject),
    )
    .convert_to_csv(&input, &output)
    .unwrap_err();
    assert!(matches!(
        err,
        PaysheetError::RaggedRow {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
    assert!(!output.exists());
}

#[test]
fn test_write_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "DATA.dat", SAMPLE_TEXT.as_bytes());
    let output = dir.path().join("missing").join("output.csv");

    let err = DocumentConverter::new()
        .convert_to_csv(&input, &output)
        .unwrap_err();
    assert!(matches!(err, PaysheetError::Write { ref path, .. } if path == &output));
    assert!(!output.exists());
}
