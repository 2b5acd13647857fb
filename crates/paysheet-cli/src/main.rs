#![allow(
    clippy::needless_pass_by_value, // clap requires owned strings
    clippy::must_use_candidate,     // CLI functions don't need must_use
)]

//! Paysheet CLI - payroll document to CSV converter
//!
//! Reads a PDF, DOCX or DAT payroll document, derives the Gross Salary column
//! and the summary trailer, and writes the result as CSV.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use paysheet_backend::{BackendOptions, ConversionReport, DocumentConverter};
use paysheet_core::{
    options::DEFAULT_DELIMITER, ConversionOptions, ErrorKind, InputFormat, PaysheetError,
    RaggedRowPolicy,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Exit codes, one per error kind
mod exit_code {
    pub const OTHER: i32 = 1;
    pub const UNSUPPORTED_FORMAT: i32 = 2;
    pub const EXTRACTION: i32 = 3;
    pub const EMPTY_TEXT: i32 = 4;
    pub const TABLE: i32 = 5;
    pub const WRITE: i32 = 6;
}

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Default `RUST_LOG` filter for this level
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "paysheet",
    about = "Convert payroll documents (PDF, DOCX, DAT) to CSV",
    long_about = "Convert a payroll document to CSV.\n\
                  \n\
                  The document must hold tab-delimited lines with a heading row naming\n\
                  id, basic_salary and allowances. Duplicate rows are removed, a\n\
                  'Gross Salary' column is added and a summary row with the second\n\
                  highest and the average gross salary is appended.",
    version
)]
struct Args {
    /// Input document (.pdf, .docx or .dat)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV path
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// TOML config file with a [convert] section
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How to treat lines whose field count differs from the heading
    #[arg(long, value_name = "POLICY", value_parser = parse_ragged_rows)]
    ragged_rows: Option<RaggedRowPolicy>,

    /// Field delimiter in the extracted text (a single character, or "tab")
    #[arg(long, value_name = "CHAR", value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Read DOCX table rows as tab-delimited lines
    #[arg(long)]
    docx_tables: bool,

    /// Overwrite an existing output file (default)
    #[arg(long)]
    force: bool,

    /// Fail if the output file already exists
    #[arg(long, conflicts_with = "force")]
    no_clobber: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

/// Configuration file structure
///
/// Precedence order (highest to lowest):
/// 1. Command-line arguments
/// 2. Config file given with `--config`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    /// Default settings for conversion
    #[serde(skip_serializing_if = "Option::is_none")]
    convert: Option<ConvertConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConvertConfig {
    /// Field delimiter (single character, or "tab")
    #[serde(skip_serializing_if = "Option::is_none")]
    delimiter: Option<String>,

    /// Columns to coerce to numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    numeric_columns: Option<Vec<String>>,

    /// Ragged row policy (pad, truncate or reject)
    #[serde(skip_serializing_if = "Option::is_none")]
    ragged_rows: Option<RaggedRowPolicy>,

    /// Read DOCX table rows
    #[serde(skip_serializing_if = "Option::is_none")]
    docx_tables: Option<bool>,
}

impl Config {
    /// Load configuration from file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            // TOML errors include line/column information, preserve it
            eprintln!("{} {}", "Parse error:".yellow().bold(), e);
            eprintln!("{} Configuration file syntax:", "Help:".cyan().bold());
            eprintln!("  [convert]");
            eprintln!("  delimiter = \"tab\"");
            eprintln!("  numeric_columns = [\"id\", \"basic_salary\", \"allowances\"]");
            eprintln!("  ragged_rows = \"pad\"  # pad, truncate or reject");
            eprintln!("  docx_tables = false");
            anyhow::anyhow!("Failed to parse config file: {}", path.display())
        })?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

fn parse_delimiter(s: &str) -> std::result::Result<char, String> {
    match s {
        "tab" | "\\t" => Ok('\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '\n' && c != '\r' => Ok(c),
                _ => Err(format!("delimiter must be a single character, got {s:?}")),
            }
        }
    }
}

fn parse_ragged_rows(s: &str) -> std::result::Result<RaggedRowPolicy, String> {
    s.parse().map_err(|e: PaysheetError| e.to_string())
}

/// Merge CLI flags over the config file over the defaults
fn resolve_options(args: &Args, config: &Config) -> Result<(ConversionOptions, BackendOptions)> {
    let file = config.convert.clone().unwrap_or_default();

    let delimiter = match (args.delimiter, file.delimiter.as_deref()) {
        (Some(c), _) => c,
        (None, Some(s)) => parse_delimiter(s)
            .map_err(|e| anyhow::anyhow!("Invalid delimiter in config file: {e}"))?,
        (None, None) => DEFAULT_DELIMITER,
    };

    let mut options = ConversionOptions::default()
        .with_delimiter(delimiter)
        .with_ragged_rows(args.ragged_rows.or(file.ragged_rows).unwrap_or_default());
    if let Some(columns) = file.numeric_columns {
        options = options.with_numeric_columns(columns);
    }

    let backend_options =
        BackendOptions::default().with_docx_tables(args.docx_tables || file.docx_tables.unwrap_or(false));

    Ok((options, backend_options))
}

fn run(args: &Args, verbosity: Verbosity) -> Result<ConversionReport> {
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    let (options, backend_options) = resolve_options(args, &config)?;

    if args.no_clobber && args.output.exists() {
        bail!(
            "Output file already exists: {} (--no-clobber specified)",
            args.output.display()
        );
    }

    if verbosity.is_verbose() {
        eprintln!(
            "{} Converting {} (delimiter {:?}, ragged rows: {})",
            "Info:".blue().bold(),
            args.input.display(),
            options.delimiter,
            options.ragged_rows
        );
    }

    let report = DocumentConverter::with_options(options)
        .with_backend_options(backend_options)
        .convert_to_csv(&args.input, &args.output)?;

    Ok(report)
}

fn print_report(report: &ConversionReport, verbosity: Verbosity) {
    if !verbosity.should_show_output() {
        return;
    }

    for warning in &report.warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    println!(
        "{}",
        format!("CSV file created successfully at {}", report.output.display()).green()
    );

    if verbosity.is_verbose() {
        eprintln!(
            "{} {} rows written, {} duplicates removed ({} input)",
            "Info:".blue().bold(),
            report.data_rows,
            report.duplicates_removed,
            report.format
        );
        eprintln!("{} {}", "Info:".blue().bold(), report.trailer);
        eprintln!("{} Completed in {:?}", "Info:".blue().bold(), report.elapsed);
    }
}

fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<PaysheetError>().map(PaysheetError::kind) {
        Some(ErrorKind::UnsupportedFormat) => exit_code::UNSUPPORTED_FORMAT,
        Some(ErrorKind::Extraction | ErrorKind::Io) => exit_code::EXTRACTION,
        Some(ErrorKind::EmptyText) => exit_code::EMPTY_TEXT,
        Some(ErrorKind::MissingColumn | ErrorKind::RaggedRow) => exit_code::TABLE,
        Some(ErrorKind::Write) => exit_code::WRITE,
        Some(ErrorKind::Config) | None => exit_code::OTHER,
    }
}

fn report_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), error);

    if let Some(PaysheetError::UnsupportedFormat(_)) = error.downcast_ref::<PaysheetError>() {
        let supported: Vec<String> = InputFormat::ALL
            .iter()
            .flat_map(InputFormat::extensions)
            .map(|ext| format!(".{ext}"))
            .collect();
        eprintln!("{} Supported formats: {}", "Help:".cyan().bold(), supported.join(", "));
    }
}

fn main() {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .target(env_logger::Target::Stderr)
        .init();

    match run(&args, verbosity) {
        Ok(report) => print_report(&report, verbosity),
        Err(error) => {
            report_error(&error);
            std::process::exit(exit_code_for(&error));
        }
    }
}
