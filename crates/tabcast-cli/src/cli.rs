//! CLI argument definitions for the tabcast converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "tabcast",
    version,
    about = "Convert delimited text, JSON payloads, and spreadsheets to typed Parquet",
    long_about = "Convert heterogeneous tabular sources to typed Parquet.\n\n\
                  Column types (integer, float, datetime, text) are inferred from the\n\
                  data itself; datetimes are canonicalized to ISO-8601 UTC. Each input\n\
                  file is converted independently and written atomically."
)]
pub struct Cli {
    /// Source file to convert (CSV, JSON, or spreadsheet workbook).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination path (default: <INPUT> with .parquet extension; a
    /// multi-sheet workbook treats this as a directory).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Source format (default: inferred from the input extension).
    #[arg(long = "format", value_enum, default_value = "auto")]
    pub format: FormatArg,

    /// Wall-clock limit in seconds for reading one spreadsheet workbook.
    #[arg(long = "read-timeout", value_name = "SECS", default_value_t = 60)]
    pub read_timeout: u64,

    /// Minimum fraction of non-null values that must parse numerically for a
    /// column to become integer/float.
    #[arg(long = "numeric-threshold", value_name = "FRACTION")]
    pub numeric_threshold: Option<f64>,

    /// Minimum fraction of non-null values that must parse as dates for a
    /// column to become datetime.
    #[arg(long = "date-threshold", value_name = "FRACTION")]
    pub date_threshold: Option<f64>,

    /// Fraction of time-of-day-looking values (like "10:00") at which a
    /// column is rejected as dates.
    #[arg(long = "time-only-threshold", value_name = "FRACTION")]
    pub time_only_threshold: Option<f64>,

    /// Extra strings treated as missing values, in addition to the defaults.
    #[arg(long = "null-token", value_name = "TOKEN")]
    pub null_tokens: Vec<String>,

    /// Name output files with opaque identifiers instead of sheet names.
    #[arg(long = "anonymize")]
    pub anonymize: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Source format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Infer from the input file extension.
    Auto,
    /// Comma-delimited text.
    Csv,
    /// JSON payload.
    Json,
    /// Spreadsheet workbook (xlsx, xls, ods, ...).
    Spreadsheet,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
