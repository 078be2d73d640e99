use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDateTime;

use crate::error::ReconError;
use crate::extraction::{Cell, Table};

/// Read one sheet of an xlsx workbook held in memory.
///
/// The first row is the header; header names are trimmed so that
/// `" Doc Receive "` and `"Doc Receive"` address the same column.
pub fn read_table(bytes: &[u8], sheet: &str) -> Result<Table, ReconError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| ReconError::Workbook(format!("{e}")))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(ReconError::SheetNotFound {
            sheet: sheet.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ReconError::Workbook(format!("failed to read sheet '{sheet}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|c| convert_cell(c).as_text().unwrap_or_default().trim().to_string())
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut data = Vec::new();
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(convert_cell).collect();
        // Fully blank rows are padding at the bottom of most exports.
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        data.push(cells);
    }

    tracing::debug!(sheet, columns = headers.len(), rows = data.len(), "read worksheet");

    Ok(Table {
        headers,
        rows: data,
    })
}

fn convert_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::Date(value),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_iso_datetime(s) {
            Some(value) => Cell::Date(value),
            None => Cell::Text(s.clone()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
