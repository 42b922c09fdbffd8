//! Whole-table materialization.
//!
//! Applies the column classifier to every column of a raw table. Columns are
//! mutually independent; the conversion of one column never aborts the
//! conversion of the table.

use tabcast_model::{ConvertOptions, MaterializedTable, RawTable};

use crate::classify::classify_column;

/// Convert a raw table into a typed table with the same row count.
#[must_use]
pub fn materialize(name: &str, raw: &RawTable, options: &ConvertOptions) -> MaterializedTable {
    let columns = raw
        .names
        .iter()
        .zip(&raw.columns)
        .map(|(column_name, cells)| classify_column(column_name, cells, options))
        .collect();

    let table = MaterializedTable {
        name: name.to_string(),
        columns,
    };

    let losses = table.coercion_losses();
    if losses > 0 {
        tracing::warn!(table = name, losses, "cells degraded to null during coercion");
    }
    tracing::debug!(
        table = name,
        rows = table.row_count(),
        columns = table.columns.len(),
        "materialized table"
    );

    table
}
