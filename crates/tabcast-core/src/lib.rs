//! End-to-end conversion of heterogeneous tabular sources into typed
//! Parquet tables.
//!
//! Each source file is a stateless, independent unit of work: an adapter
//! reads it into raw string tables, the classifier types every column, and
//! the result is written atomically. Configuration travels explicitly in
//! [`ConvertOptions`](tabcast_model::ConvertOptions); the engine holds no
//! state across invocations, so callers may safely convert many files in
//! parallel.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabcast_core::{convert_delimited, ConvertOptions};
//!
//! let options = ConvertOptions::default();
//! let outcome = convert_delimited(
//!     Path::new("input.csv"),
//!     Path::new("output.parquet"),
//!     &options,
//! )?;
//! println!("wrote {} tables, {} lossy cells", outcome.tables, outcome.coercion_losses);
//! ```

mod convert;
mod error;

pub use convert::{
    ConvertOutcome, convert_delimited, convert_json, convert_spreadsheet, materialize_delimited,
    materialize_json, materialize_workbook, write_tables,
};
pub use error::{ConvertError, Result};

// Re-exported so binary callers need only depend on this crate.
pub use tabcast_model::{ConvertOptions, MaterializedTable, OutputNaming};
