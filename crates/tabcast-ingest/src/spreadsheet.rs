//! Spreadsheet workbook splitting.
//!
//! Every sheet of a workbook is read as an independent raw table, with
//! every cell rendered as a raw string. The reader itself performs no
//! auto-nulling; blank cells become explicit empty strings and missing-value
//! interpretation happens downstream in the classifier.
//!
//! Pathological workbooks exist (hundreds of sheets, millions of formatted
//! cells), so one wall-clock timeout bounds the whole read. On expiry the
//! worker thread is abandoned and its result discarded — no partial output
//! ever escapes.

use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use calamine::{Data, Range, Reader, open_workbook_auto};

use tabcast_model::RawTable;

use crate::error::{IngestError, Result};

/// One sheet read from a workbook: original sheet name plus its raw table.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub table: RawTable,
}

/// Read every sheet of a workbook under a wall-clock timeout.
///
/// Exceeding the bound hard-aborts the read: the call returns
/// [`IngestError::ReadTimeout`] and the abandoned worker's result is never
/// observed.
pub fn read_workbook(path: &Path, timeout: Duration) -> Result<Vec<SheetTable>> {
    let owned = path.to_path_buf();
    read_with_timeout(path, timeout, move || read_workbook_blocking(&owned))
}

/// Run a blocking read on a worker thread, bounded by `timeout`.
fn read_with_timeout<F>(path: &Path, timeout: Duration, read: F) -> Result<Vec<SheetTable>>
where
    F: FnOnce() -> Result<Vec<SheetTable>> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("workbook-read".to_string())
        .spawn(move || {
            // The receiver may be gone after a timeout
            let _ = sender.send(read());
        })
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    match receiver.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(path = %path.display(), ?timeout, "workbook read timed out, abandoning");
            Err(IngestError::ReadTimeout {
                path: path.to_path_buf(),
                timeout,
            })
        }
    }
}

fn read_workbook_blocking(path: &Path) -> Result<Vec<SheetTable>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    let names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| workbook_error(path, &e))?;
        let table = table_from_range(&range);
        tracing::debug!(
            path = %path.display(),
            sheet = name,
            rows = table.row_count(),
            columns = table.width(),
            "read sheet"
        );
        sheets.push(SheetTable { name, table });
    }
    Ok(sheets)
}

fn workbook_error(path: &Path, error: &dyn std::fmt::Display) -> IngestError {
    IngestError::WorkbookRead {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Convert a sheet's cell range to a raw table: first row is the header,
/// every cell rendered as a string.
fn table_from_range(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return RawTable::default();
    };

    let names = header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = render_cell(cell);
            if name.trim().is_empty() {
                format!("column_{index}")
            } else {
                name
            }
        })
        .collect();

    let mut table = RawTable::new(names);
    for row in rows {
        table.push_row(row.iter().map(render_cell).collect());
    }
    table
}

/// Render one spreadsheet cell as a raw string.
///
/// Integral floats render without the trailing `.0` so cells typed as
/// numbers in the sheet still classify as integers downstream.
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|naive| naive.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
