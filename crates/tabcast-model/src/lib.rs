//! Core data model for the tabcast conversion engine.
//!
//! This crate defines the shapes the rest of the workspace agrees on:
//!
//! - [`RawTable`]: unclassified source strings, column-major
//! - [`ColumnClassification`] / [`TypedColumn`] / [`MaterializedTable`]:
//!   the typed, nullable columnar result
//! - [`ConvertOptions`]: the explicit per-call configuration surface
//!
//! The engine holds no state across invocations; a `RawTable` is created
//! fresh per source read and discarded once converted, and a
//! `MaterializedTable` is owned by the caller once produced.

mod options;
mod table;

pub use options::{
    ConvertOptions, DEFAULT_DATE_THRESHOLD, DEFAULT_NULL_TOKENS, DEFAULT_NUMERIC_THRESHOLD,
    DEFAULT_READ_TIMEOUT, DEFAULT_TIME_ONLY_THRESHOLD, OutputNaming, default_null_tokens,
};
pub use table::{ColumnClassification, ColumnValues, MaterializedTable, RawTable, TypedColumn};
