//! Per-file conversion pipeline.
//!
//! A format-specific adapter produces one or more raw tables; each passes
//! independently through the materializer; the typed result is written
//! atomically as Parquet. Each function here converts exactly one source
//! file and returns either a [`ConvertOutcome`] report or a typed,
//! file-scoped error — batching across files belongs to the caller.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tabcast_ingest::{NormalizedPayload, read_delimited, read_json, read_workbook};
use tabcast_model::{ConvertOptions, MaterializedTable};
use tabcast_output::{table_file_stem, write_table};
use tabcast_transform::materialize;

use crate::error::Result;

/// Report for one converted source file, aggregated by the batch driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOutcome {
    /// Output files written, in sheet order.
    pub written: Vec<PathBuf>,
    /// Typed tables produced.
    pub tables: usize,
    /// True when the source was an upstream error envelope and no table was
    /// produced; a skip, not a failure.
    pub skipped: bool,
    /// Total cells degraded to null across all produced tables.
    pub coercion_losses: usize,
}

/// Read and materialize a delimited text file.
pub fn materialize_delimited(
    input: &Path,
    options: &ConvertOptions,
) -> Result<MaterializedTable> {
    let raw = read_delimited(input)?;
    Ok(materialize(&source_name(input), &raw, options))
}

/// Read and materialize a JSON payload.
///
/// Returns `None` for an upstream error envelope: no table, no error.
pub fn materialize_json(
    input: &Path,
    options: &ConvertOptions,
) -> Result<Option<MaterializedTable>> {
    match read_json(input)? {
        NormalizedPayload::ErrorEnvelope => Ok(None),
        NormalizedPayload::Rows(raw) => Ok(Some(materialize(&source_name(input), &raw, options))),
    }
}

/// Read and materialize every sheet of a spreadsheet workbook.
///
/// Each table carries its original sheet name; output naming policy is
/// applied later, at write time.
pub fn materialize_workbook(
    input: &Path,
    options: &ConvertOptions,
) -> Result<Vec<MaterializedTable>> {
    let sheets = read_workbook(input, options.read_timeout)?;
    Ok(sheets
        .into_iter()
        .map(|sheet| materialize(&sheet.name, &sheet.table, options))
        .collect())
}

/// Convert one delimited text file to a Parquet file at `dest`.
pub fn convert_delimited(
    input: &Path,
    dest: &Path,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let table = materialize_delimited(input, options)?;
    let written = write_table(&table, dest)?;
    Ok(ConvertOutcome {
        written: vec![written],
        tables: 1,
        skipped: false,
        coercion_losses: table.coercion_losses(),
    })
}

/// Convert one JSON file to a Parquet file at `dest`.
///
/// An upstream error envelope yields an outcome with `skipped` set and no
/// output file; the caller records it and continues.
pub fn convert_json(input: &Path, dest: &Path, options: &ConvertOptions) -> Result<ConvertOutcome> {
    let Some(table) = materialize_json(input, options)? else {
        tracing::info!(input = %input.display(), "error envelope, no table produced");
        return Ok(ConvertOutcome {
            skipped: true,
            ..ConvertOutcome::default()
        });
    };
    let written = write_table(&table, dest)?;
    Ok(ConvertOutcome {
        written: vec![written],
        tables: 1,
        skipped: false,
        coercion_losses: table.coercion_losses(),
    })
}

/// Convert one spreadsheet workbook to Parquet file(s) under `dest`.
///
/// A multi-sheet workbook treats `dest` as a directory and writes one file
/// per sheet. A single-sheet workbook writes into `dest` when it is (or
/// looks like) a directory, otherwise to `dest` itself as a file path.
pub fn convert_spreadsheet(
    input: &Path,
    dest: &Path,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let tables = materialize_workbook(input, options)?;
    write_tables(&tables, dest, options)
}

/// Write already-materialized tables under the spreadsheet destination
/// rules and naming policy.
pub fn write_tables(
    tables: &[MaterializedTable],
    dest: &Path,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let mut outcome = ConvertOutcome {
        tables: tables.len(),
        ..ConvertOutcome::default()
    };
    let mut used_stems: HashSet<String> = HashSet::new();

    match tables {
        [] => {}
        [table] => {
            let dest_file = if looks_like_directory(dest) {
                let stem = table_file_stem(&table.name, options.naming);
                dest.join(format!("{stem}.parquet"))
            } else {
                dest.to_path_buf()
            };
            outcome.coercion_losses += table.coercion_losses();
            outcome.written.push(write_table(table, &dest_file)?);
        }
        many => {
            for table in many {
                let stem = unique_stem(table_file_stem(&table.name, options.naming), &mut used_stems);
                let dest_file = dest.join(format!("{stem}.parquet"));
                outcome.coercion_losses += table.coercion_losses();
                outcome.written.push(write_table(table, &dest_file)?);
            }
        }
    }

    Ok(outcome)
}

/// Table name for single-table sources: the input file stem.
fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string())
}

/// True when `path` should be treated as a directory destination.
fn looks_like_directory(path: &Path) -> bool {
    if path.is_dir() {
        return true;
    }
    let text = path.as_os_str().to_string_lossy();
    text.ends_with('/') || text.ends_with('\\') || path.extension().is_none()
}

/// Deduplicate sanitized stems within one workbook so no sheet silently
/// overwrites another.
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    if used.insert(stem.clone()) {
        return stem;
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{stem}_{counter}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
