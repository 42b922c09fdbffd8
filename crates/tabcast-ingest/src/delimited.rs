//! Delimited-text reading into raw string tables.
//!
//! The reader performs no type interpretation at all: every cell comes back
//! as a raw string (or explicit blank) for the classifier downstream. The
//! first record is the header; ragged data rows are padded or truncated to
//! the header width.

use std::fs;
use std::path::Path;

use tabcast_model::RawTable;

use crate::encoding::decode_text;
use crate::error::{IngestError, Result};

/// Read a delimited text file of unknown encoding into a [`RawTable`].
pub fn read_delimited(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let text = decode_text(path, &bytes)?;
    // Decoder already consumes a matching BOM; this covers a stray one
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| IngestError::DelimitedParse {
            path: path.to_path_buf(),
            source: e,
        })?,
        None => {
            return Err(IngestError::EmptyDelimited {
                path: path.to_path_buf(),
            });
        }
    };
    let names: Vec<String> = header.iter().map(str::to_string).collect();
    if names.iter().all(|n| n.trim().is_empty()) {
        return Err(IngestError::EmptyDelimited {
            path: path.to_path_buf(),
        });
    }

    let mut table = RawTable::new(names);
    for record in records {
        let record = record.map_err(|e| IngestError::DelimitedParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.width(),
        "read delimited source"
    );
    Ok(table)
}
