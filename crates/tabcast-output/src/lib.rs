//! Columnar persistence for materialized tables.
//!
//! Converts [`MaterializedTable`](tabcast_model::MaterializedTable)s to
//! polars DataFrames, writes them to Parquet atomically (temp file +
//! rename), reads them back for round-trip verification, and derives output
//! file names from sheet names under the configured naming policy.
//!
//! No table is ever visible half-written: the destination path appears only
//! after the full file is on disk.

mod error;
mod naming;
mod parquet;

pub use error::{OutputError, Result};
pub use naming::{safe_sheet_name, table_file_stem};
pub use parquet::{from_dataframe, read_table, to_dataframe, write_table};
