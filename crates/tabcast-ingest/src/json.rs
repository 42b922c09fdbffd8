//! JSON payload shape normalization.
//!
//! Crawled APIs return wildly different shapes for the same logical table:
//! bare record lists, `{"data": [...]}` wrappers, columnar dicts, single
//! objects, and error bodies disguised as data. The shape is decided once,
//! up front, as a closed variant; everything then reduces to one row list.
//!
//! Nested list/dict values inside a row are serialized to compact JSON
//! strings, not recursively typed — inference downstream is scalar per
//! column only.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use tabcast_model::RawTable;

use crate::error::{IngestError, Result};

/// Wrapper keys whose list value is unwrapped as the row list.
const WRAPPER_KEYS: [&str; 4] = ["data", "results", "rows", "items"];

/// The recognized payload shapes, decided once at the top of normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A list of objects, either top-level or under a wrapper key.
    RecordList,
    /// An object whose values are equal-length lists; transposed into rows.
    ColumnarDict,
    /// Any other object: treated as a single-row table.
    SingleRecord,
    /// An object with an `error` key: an upstream API error, not data.
    ErrorEnvelope,
    /// Nothing tabular can be made of this.
    Unknown,
}

/// Outcome of normalizing a payload.
///
/// The error envelope is a deliberate non-fatal skip signal: the caller
/// records "no table produced" and continues with the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedPayload {
    Rows(RawTable),
    ErrorEnvelope,
}

/// Classify a parsed JSON value into one of the closed payload shapes.
///
/// Precedence: record list, then error envelope, then wrapper keys, then
/// columnar dict, then single record.
#[must_use]
pub fn classify_payload(value: &Value) -> PayloadShape {
    match value {
        Value::Array(items) => {
            if items.iter().all(Value::is_object) {
                PayloadShape::RecordList
            } else {
                PayloadShape::Unknown
            }
        }
        Value::Object(map) => {
            if map.contains_key("error") {
                return PayloadShape::ErrorEnvelope;
            }
            if WRAPPER_KEYS
                .iter()
                .any(|key| map.get(*key).is_some_and(Value::is_array))
            {
                return PayloadShape::RecordList;
            }
            if !map.is_empty() && map.values().all(Value::is_array) {
                let mut lengths = map.values().map(|v| v.as_array().map_or(0, Vec::len));
                let first = lengths.next().unwrap_or(0);
                if lengths.all(|len| len == first) {
                    return PayloadShape::ColumnarDict;
                }
            }
            PayloadShape::SingleRecord
        }
        _ => PayloadShape::Unknown,
    }
}

/// Reduce a parsed JSON payload to a raw table, or signal a skip.
///
/// A malformed or unrecognizable payload is fatal for this file only.
pub fn normalize_payload(path: &Path, value: &Value) -> Result<NormalizedPayload> {
    match classify_payload(value) {
        PayloadShape::RecordList => {
            let rows = record_list(value).ok_or_else(|| IngestError::MalformedPayload {
                path: path.to_path_buf(),
                reason: "wrapped row list is not a list of objects".to_string(),
            })?;
            Ok(NormalizedPayload::Rows(table_from_records(rows)))
        }
        PayloadShape::ColumnarDict => Ok(NormalizedPayload::Rows(transpose_columnar(value))),
        PayloadShape::SingleRecord => {
            let row = std::slice::from_ref(value);
            Ok(NormalizedPayload::Rows(table_from_records(row)))
        }
        PayloadShape::ErrorEnvelope => {
            tracing::warn!(path = %path.display(), "upstream error envelope, skipping");
            Ok(NormalizedPayload::ErrorEnvelope)
        }
        PayloadShape::Unknown => Err(IngestError::MalformedPayload {
            path: path.to_path_buf(),
            reason: "unrecognized payload shape".to_string(),
        }),
    }
}

/// Read and normalize a JSON document from disk.
pub fn read_json(path: &Path) -> Result<NormalizedPayload> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| IngestError::MalformedPayload {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {e}"),
        })?;
    normalize_payload(path, &value)
}

/// The row list for a `RecordList` shape: the top-level array, or the first
/// wrapper key holding an array of objects.
fn record_list(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            let key = WRAPPER_KEYS
                .iter()
                .find(|key| map.get(**key).is_some_and(Value::is_array))?;
            let items = map.get(*key)?.as_array()?;
            if items.iter().all(Value::is_object) {
                Some(items)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Build a raw table from a list of object rows.
///
/// Column order is first-seen across rows; keys absent from a row produce
/// explicit blanks.
fn table_from_records(rows: &[Value]) -> RawTable {
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if seen.insert(key.clone()) {
                    names.push(key.clone());
                }
            }
        }
    }

    let mut table = RawTable::new(names);
    for row in rows {
        if let Value::Object(map) = row {
            let cells = table
                .names
                .iter()
                .map(|name| map.get(name).map(render_cell).unwrap_or_default())
                .collect();
            table.push_row(cells);
        }
    }
    table
}

/// Transpose a columnar dict (`{"a":[1,2],"b":[3,4]}`) into rows.
fn transpose_columnar(value: &Value) -> RawTable {
    let Value::Object(map) = value else {
        return RawTable::default();
    };
    let names: Vec<String> = map.keys().cloned().collect();
    let row_count = map
        .values()
        .next()
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let mut table = RawTable::new(names);
    for index in 0..row_count {
        let cells = table
            .names
            .iter()
            .map(|name| {
                map.get(name)
                    .and_then(Value::as_array)
                    .and_then(|list| list.get(index))
                    .map(render_cell)
                    .unwrap_or_default()
            })
            .collect();
        table.push_row(cells);
    }
    table
}

/// Render one JSON value as a raw cell string.
///
/// Scalars render naturally; nested containers serialize to compact JSON.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
