//! Table representations before and after classification.
//!
//! A [`RawTable`] holds unclassified source strings, one `Vec<String>` per
//! column, with every column the same length. A [`MaterializedTable`] is the
//! terminal artifact of the engine: ordered [`TypedColumn`]s sharing one row
//! count, each holding nullable values of exactly one semantic type.

use serde::{Deserialize, Serialize};

/// A table whose cells are still unclassified source strings.
///
/// Blank cells are explicit empty strings; the reader that produced the table
/// performs no null interpretation of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Ordered column names.
    pub names: Vec<String>,
    /// Column-major cell data; every inner vector has the same length.
    pub columns: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given column names.
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let columns = names.iter().map(|_| Vec::new()).collect();
        Self { names, columns }
    }

    /// Append one row, padding short rows with blanks and truncating long
    /// ones so the equal-column-length invariant holds.
    pub fn push_row(&mut self, row: Vec<String>) {
        let mut cells = row.into_iter();
        for column in &mut self.columns {
            column.push(cells.next().unwrap_or_default());
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.names.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// The semantic type a column adopted during classification.
///
/// Exactly one variant wins per column; a column is never simultaneously
/// numeric and date-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnClassification {
    /// Whole numbers, stored as nullable `i64`.
    Integer,
    /// Floating-point numbers, stored as nullable `f64`.
    Float,
    /// Date or datetime values, canonicalized to ISO 8601 UTC strings.
    DateTime {
        /// True when any value carries a non-zero time-of-day component.
        has_time: bool,
    },
    /// Free text fallback.
    Text,
}

/// Nullable typed cell data for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    /// Canonical ISO 8601 UTC strings (`YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`).
    DateTime(Vec<Option<String>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    /// Number of cells, null or not.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::DateTime(v) | ColumnValues::Text(v) => v.len(),
        }
    }

    /// True when the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of null cells.
    #[must_use]
    pub fn null_count(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnValues::Float(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnValues::DateTime(v) | ColumnValues::Text(v) => {
                v.iter().filter(|c| c.is_none()).count()
            }
        }
    }
}

/// A column after classification: name, winning type, nullable typed values.
///
/// Invariant: `values` matches `classification` (`Integer` holds integer
/// cells and so on), and every non-null cell conforms to that type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    pub name: String,
    pub classification: ColumnClassification,
    pub values: ColumnValues,
    /// Cells that failed to parse under the winning classification and were
    /// degraded to null. Not an error; surfaced for observability.
    pub coercion_losses: usize,
}

impl TypedColumn {
    /// Number of cells in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Terminal artifact of the engine: ordered typed columns sharing one row
/// count, named after the source (file stem or sheet name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializedTable {
    pub name: String,
    pub columns: Vec<TypedColumn>,
}

impl MaterializedTable {
    /// Number of rows (0 for a table with no columns).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, TypedColumn::len)
    }

    /// Ordered column names.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&TypedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Total cells degraded to null across all columns.
    #[must_use]
    pub fn coercion_losses(&self) -> usize {
        self.columns.iter().map(|c| c.coercion_losses).sum()
    }
}
