//! Parquet persistence for materialized tables.
//!
//! Writes are atomic: the DataFrame is written to a temporary file in the
//! destination directory, then renamed into place, so a crash never leaves
//! a partially written table visible. Read-back restores column order,
//! names, classifications and nullability exactly; the `has_time` flag is
//! recomputed from the values, which reproduces the written flag by
//! construction.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Timelike};
use polars::prelude::{
    Column, DataFrame, DataType, IntoColumn, NamedFrom, ParquetReader, ParquetWriter, PlSmallStr,
    SerReader, Series, TimeUnit,
};
use tempfile::NamedTempFile;

use tabcast_model::{ColumnClassification, ColumnValues, MaterializedTable, TypedColumn};
use tabcast_transform::{format_iso8601_utc, parse_datetime_utc};

use crate::error::{OutputError, Result};

/// Convert a materialized table to a polars DataFrame.
///
/// Integer columns become `Int64`, Float `Float64`, Text `String`, and
/// DateTime columns become naive `Datetime[μs]` (UTC by convention).
pub fn to_dataframe(table: &MaterializedTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        columns.push(to_polars_column(column)?);
    }
    DataFrame::new(columns).map_err(OutputError::from)
}

fn to_polars_column(column: &TypedColumn) -> Result<Column> {
    let name: PlSmallStr = column.name.as_str().into();
    let converted = match &column.values {
        ColumnValues::Integer(values) => Column::new(name, values.as_slice()),
        ColumnValues::Float(values) => Column::new(name, values.as_slice()),
        ColumnValues::Text(values) => Column::new(name, values.as_slice()),
        ColumnValues::DateTime(values) => {
            let mut stamps: Vec<Option<i64>> = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    None => stamps.push(None),
                    Some(iso) => {
                        let dt = parse_datetime_utc(iso).ok_or_else(|| {
                            OutputError::InvalidDateTime {
                                column: column.name.clone(),
                                value: iso.clone(),
                            }
                        })?;
                        stamps.push(Some(dt.timestamp_micros()));
                    }
                }
            }
            Series::new(name, stamps)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
                .into_column()
        }
    };
    Ok(converted)
}

/// Reconstruct a materialized table from a DataFrame read off disk.
pub fn from_dataframe(path: &Path, name: &str, df: &DataFrame) -> Result<MaterializedTable> {
    let mut columns = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let column_name = series.name().to_string();

        let (classification, values) = match series.dtype() {
            DataType::Int64 => (
                ColumnClassification::Integer,
                ColumnValues::Integer(series.i64()?.into_iter().collect()),
            ),
            DataType::Float64 => (
                ColumnClassification::Float,
                ColumnValues::Float(series.f64()?.into_iter().collect()),
            ),
            DataType::String => (
                ColumnClassification::Text,
                ColumnValues::Text(
                    series
                        .str()?
                        .into_iter()
                        .map(|cell| cell.map(str::to_string))
                        .collect(),
                ),
            ),
            DataType::Datetime(unit, _) => {
                let unit = *unit;
                let stamps = series.cast(&DataType::Int64)?;
                let mut rendered: Vec<Option<String>> = Vec::with_capacity(series.len());
                let mut has_time = false;
                for stamp in stamps.i64()? {
                    match stamp {
                        None => rendered.push(None),
                        Some(raw) => {
                            let micros = match unit {
                                TimeUnit::Nanoseconds => raw / 1_000,
                                TimeUnit::Microseconds => raw,
                                TimeUnit::Milliseconds => raw * 1_000,
                            };
                            let dt = DateTime::from_timestamp_micros(micros).ok_or_else(|| {
                                OutputError::DataFrame {
                                    message: format!(
                                        "timestamp {micros} out of range in column '{column_name}'"
                                    ),
                                }
                            })?;
                            if dt.hour() != 0 || dt.minute() != 0 || dt.second() != 0 {
                                has_time = true;
                            }
                            rendered.push(Some(format_iso8601_utc(&dt)));
                        }
                    }
                }
                (
                    ColumnClassification::DateTime { has_time },
                    ColumnValues::DateTime(rendered),
                )
            }
            other => {
                return Err(OutputError::UnsupportedColumnType {
                    path: path.to_path_buf(),
                    column: column_name,
                    dtype: other.to_string(),
                });
            }
        };

        columns.push(TypedColumn {
            name: column_name,
            classification,
            values,
            coercion_losses: 0,
        });
    }

    Ok(MaterializedTable {
        name: name.to_string(),
        columns,
    })
}

/// Write one table to Parquet atomically and return the written path.
///
/// The parent directory is created if needed. The table is written to a
/// temporary file alongside the destination and renamed into place on
/// success; on any failure the temporary file is cleaned up and the
/// destination is untouched.
pub fn write_table(table: &MaterializedTable, dest: &Path) -> Result<PathBuf> {
    let mut df = to_dataframe(table)?;

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| OutputError::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| OutputError::Io {
        path: parent.to_path_buf(),
        source: e,
    })?;
    ParquetWriter::new(tmp.as_file_mut()).finish(&mut df)?;
    tmp.persist(dest).map_err(|e| OutputError::Persist {
        path: dest.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::info!(
        path = %dest.display(),
        rows = table.row_count(),
        columns = table.columns.len(),
        "wrote table"
    );
    Ok(dest.to_path_buf())
}

/// Read a Parquet file back into a materialized table.
///
/// The table name is taken from the file stem.
pub fn read_table(path: &Path) -> Result<MaterializedTable> {
    let file = File::open(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let df = ParquetReader::new(file).finish()?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    from_dataframe(path, &name, &df)
}
