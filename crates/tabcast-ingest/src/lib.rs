//! Source ingestion for the tabcast conversion engine.
//!
//! Format-specific adapters turn heterogeneous sources into
//! [`RawTable`](tabcast_model::RawTable)s of unclassified strings:
//!
//! - **Delimited text** of unknown encoding ([`read_delimited`]), with
//!   encoding resolution via [`detect_encoding`] / [`decode_text`]
//! - **JSON payloads** of arbitrary shape ([`read_json`]), reduced to a
//!   uniform row list or a non-fatal error-envelope skip
//! - **Spreadsheet workbooks** ([`read_workbook`]), split into one raw table
//!   per sheet under a wall-clock timeout
//!
//! Adapters never interpret cell values; classification is entirely the
//! transform crate's concern.

mod delimited;
mod encoding;
mod error;
mod json;
mod spreadsheet;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encoding Detection ===
pub use encoding::{decode_text, detect_encoding};

// === Delimited Text ===
pub use delimited::read_delimited;

// === JSON Payloads ===
pub use json::{NormalizedPayload, PayloadShape, classify_payload, normalize_payload, read_json};

// === Spreadsheet Workbooks ===
pub use spreadsheet::{SheetTable, read_workbook};
