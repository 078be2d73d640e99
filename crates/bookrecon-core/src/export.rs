use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ReconError;
use crate::extraction::xlsx::read_table;
use crate::model::JoinedRecord;
use crate::parsing::values::{parse_date, parse_flag};

/// Suggested file name for the filtered bookings workbook.
pub const EXPORT_FILE_NAME: &str = "filtered_bookings.xlsx";

/// MIME type of the exported workbook.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row of the exported sheet, in column order.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Office",
    "Booking Number",
    "ETD",
    "Doc Receive",
    "Posted",
    "Disposition",
    "Status",
];

const EXPORT_SHEET: &str = "Sheet1";

/// One exported row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub office: Option<String>,
    pub booking_number: Option<String>,
    pub etd: Option<NaiveDate>,
    pub doc_receive: f64,
    pub posted: f64,
    pub disposition: Option<String>,
    pub status: Option<String>,
}

impl From<&JoinedRecord> for ExportRow {
    fn from(row: &JoinedRecord) -> Self {
        Self {
            office: row.office.clone(),
            booking_number: row.booking_number.clone(),
            etd: row.etd,
            doc_receive: row.doc_receive,
            posted: row.posted,
            disposition: row.disposition.clone(),
            status: row.status.clone(),
        }
    }
}

/// Render the filtered view as an xlsx workbook.
pub fn write_filtered_xlsx(view: &[JoinedRecord]) -> Result<Vec<u8>, ReconError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET)?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, record) in view.iter().enumerate() {
        let row = (idx + 1) as u32;
        let export = ExportRow::from(record);

        if let Some(ref office) = export.office {
            worksheet.write_string(row, 0, office)?;
        }
        if let Some(ref booking) = export.booking_number {
            worksheet.write_string(row, 1, booking)?;
        }
        if let Some(etd) = export.etd {
            let datetime = to_excel_date(etd)?;
            worksheet.write_datetime_with_format(row, 2, &datetime, &date_format)?;
        }
        worksheet.write_number(row, 3, export.doc_receive)?;
        worksheet.write_number(row, 4, export.posted)?;
        if let Some(ref disposition) = export.disposition {
            worksheet.write_string(row, 5, disposition)?;
        }
        if let Some(ref status) = export.status {
            worksheet.write_string(row, 6, status)?;
        }
    }

    worksheet.set_column_width(0, 14)?;
    worksheet.set_column_width(1, 20)?;
    worksheet.set_column_width(2, 12)?;

    let bytes = workbook.save_to_buffer()?;
    tracing::info!(rows = view.len(), bytes = bytes.len(), "rendered export workbook");
    Ok(bytes)
}

/// Render the filtered view and write it to `path`.
pub fn write_filtered_xlsx_file(view: &[JoinedRecord], path: &Path) -> Result<(), ReconError> {
    let bytes = write_filtered_xlsx(view)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read an exported workbook back into rows.
pub fn read_exported(bytes: &[u8]) -> Result<Vec<ExportRow>, ReconError> {
    let table = read_table(bytes, EXPORT_SHEET)?;

    let mut columns = [0usize; 7];
    for (slot, name) in columns.iter_mut().zip(EXPORT_COLUMNS) {
        *slot = table
            .column_index(name)
            .ok_or_else(|| ReconError::MissingColumn {
                column: name.to_string(),
                file: "export".into(),
            })?;
    }
    let [office, booking, etd, doc, posted, disposition, status] = columns;

    let mut rows = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        rows.push(ExportRow {
            office: table.cell(row, office).as_text(),
            booking_number: table.cell(row, booking).as_text(),
            etd: parse_date(table.cell(row, etd), row + 2)?,
            doc_receive: parse_flag(table.cell(row, doc)).unwrap_or(0.0),
            posted: parse_flag(table.cell(row, posted)).unwrap_or(0.0),
            disposition: table.cell(row, disposition).as_text(),
            status: table.cell(row, status).as_text(),
        });
    }
    Ok(rows)
}

fn to_excel_date(date: NaiveDate) -> Result<ExcelDateTime, ReconError> {
    let year = u16::try_from(date.year())
        .map_err(|_| ReconError::Export(format!("ETD year out of range: {date}")))?;
    Ok(ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(booking: &str, etd: Option<NaiveDate>) -> JoinedRecord {
        JoinedRecord {
            subject: format!("RE: {booking}"),
            office: Some("Oslo".into()),
            booking_number: Some(booking.into()),
            booking: Some(booking.into()),
            doc_receive: 1.0,
            posted: 0.0,
            disposition: Some("Cleared".into()),
            status: Some("Loaded".into()),
            etd,
        }
    }

    #[test]
    fn test_export_round_trip() {
        let etd = NaiveDate::from_ymd_opt(2024, 3, 5);
        let view = vec![record("ABC/DEF/1234567", etd), record("XYZ999", None)];

        let bytes = write_filtered_xlsx(&view).unwrap();
        let rows = read_exported(&bytes).unwrap();

        let expected: Vec<ExportRow> = view.iter().map(ExportRow::from).collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_export_header() {
        let bytes = write_filtered_xlsx(&[]).unwrap();
        let table = read_table(&bytes, "Sheet1").unwrap();
        assert_eq!(table.headers, EXPORT_COLUMNS);
        assert!(table.is_empty());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        write_filtered_xlsx_file(&[record("ABC/DEF/1234567", None)], &path).unwrap();
        let rows = read_exported(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booking_number.as_deref(), Some("ABC/DEF/1234567"));
    }
}
