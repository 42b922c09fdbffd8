//! tabcast CLI: convert one tabular source file to typed Parquet.

use std::collections::BTreeSet;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use tabcast_core::{
    ConvertOptions, ConvertOutcome, OutputNaming, convert_delimited, convert_json,
    convert_spreadsheet,
};

mod cli;
mod logging;

use crate::cli::{Cli, FormatArg, LogFormatArg};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    match run(&cli) {
        Ok(outcome) => {
            print_outcome(&outcome);
            std::process::exit(0);
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ConvertOutcome> {
    let format = resolve_format(cli.format, &cli.input)?;
    let dest = cli
        .output
        .clone()
        .unwrap_or_else(|| default_destination(&cli.input, format));
    let options = convert_options_from_cli(cli);

    let outcome = match format {
        FormatArg::Csv => convert_delimited(&cli.input, &dest, &options),
        FormatArg::Json => convert_json(&cli.input, &dest, &options),
        FormatArg::Spreadsheet => convert_spreadsheet(&cli.input, &dest, &options),
        FormatArg::Auto => unreachable!("resolved above"),
    }
    .with_context(|| format!("failed to convert {}", cli.input.display()))?;
    Ok(outcome)
}

/// Build conversion options from CLI flags; unset flags keep the defaults.
fn convert_options_from_cli(cli: &Cli) -> ConvertOptions {
    let mut options =
        ConvertOptions::default().with_read_timeout(Duration::from_secs(cli.read_timeout));
    if let Some(threshold) = cli.numeric_threshold {
        options = options.with_numeric_threshold(threshold);
    }
    if let Some(threshold) = cli.date_threshold {
        options = options.with_date_threshold(threshold);
    }
    if let Some(threshold) = cli.time_only_threshold {
        options = options.with_time_only_threshold(threshold);
    }
    if !cli.null_tokens.is_empty() {
        let mut tokens: BTreeSet<String> = options.null_tokens.clone();
        tokens.extend(cli.null_tokens.iter().cloned());
        options = options.with_null_tokens(tokens);
    }
    if cli.anonymize {
        options = options.with_naming(OutputNaming::Anonymized);
    }
    options
}

/// Resolve `auto` to a concrete format from the input extension.
fn resolve_format(arg: FormatArg, input: &Path) -> anyhow::Result<FormatArg> {
    if arg != FormatArg::Auto {
        return Ok(arg);
    }
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "txt" => Ok(FormatArg::Csv),
        "json" => Ok(FormatArg::Json),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(FormatArg::Spreadsheet),
        other => bail!(
            "cannot infer source format from extension {other:?} of {}; pass --format",
            input.display()
        ),
    }
}

/// Sibling `.parquet` path for single-table sources; for workbooks, a
/// sibling directory so multi-sheet fan-out has somewhere to go.
fn default_destination(input: &Path, format: FormatArg) -> PathBuf {
    match format {
        FormatArg::Spreadsheet => input.with_extension(""),
        _ => input.with_extension("parquet"),
    }
}

fn print_outcome(outcome: &ConvertOutcome) {
    if outcome.skipped {
        println!("skipped: source is an upstream error envelope, no table produced");
        return;
    }
    for path in &outcome.written {
        println!("wrote {}", path.display());
    }
    if outcome.coercion_losses > 0 {
        println!(
            "{} cell(s) did not fit their column type and were nulled",
            outcome.coercion_losses
        );
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: cli.log_file.is_none() && io::stderr().is_terminal(),
        log_file: cli.log_file.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_format_from_extension() {
        assert_eq!(
            resolve_format(FormatArg::Auto, Path::new("a.csv")).unwrap(),
            FormatArg::Csv
        );
        assert_eq!(
            resolve_format(FormatArg::Auto, Path::new("a.JSON")).unwrap(),
            FormatArg::Json
        );
        assert_eq!(
            resolve_format(FormatArg::Auto, Path::new("a.xlsx")).unwrap(),
            FormatArg::Spreadsheet
        );
        assert!(resolve_format(FormatArg::Auto, Path::new("a.parquet")).is_err());
    }

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(
            resolve_format(FormatArg::Json, Path::new("a.csv")).unwrap(),
            FormatArg::Json
        );
    }

    #[test]
    fn test_threshold_flags_reach_options() {
        let cli = Cli::parse_from([
            "tabcast",
            "input.csv",
            "--numeric-threshold",
            "0.8",
            "--date-threshold",
            "0.6",
            "--time-only-threshold",
            "0.7",
        ]);
        let options = convert_options_from_cli(&cli);
        assert_eq!(options.numeric_threshold, 0.8);
        assert_eq!(options.date_threshold, 0.6);
        assert_eq!(options.time_only_threshold, 0.7);
    }

    #[test]
    fn test_unset_flags_keep_defaults() {
        let cli = Cli::parse_from(["tabcast", "input.csv"]);
        let options = convert_options_from_cli(&cli);
        assert_eq!(options, ConvertOptions::default());
    }

    #[test]
    fn test_default_destination() {
        assert_eq!(
            default_destination(Path::new("/d/in.csv"), FormatArg::Csv),
            PathBuf::from("/d/in.parquet")
        );
        assert_eq!(
            default_destination(Path::new("/d/book.xlsx"), FormatArg::Spreadsheet),
            PathBuf::from("/d/book")
        );
    }
}
