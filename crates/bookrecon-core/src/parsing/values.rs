use crate::error::ReconError;
use crate::extraction::Cell;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Parse a 0/1 flag cell into its numeric value.
///
/// Handles formats like:
/// - 1, 0, 1.0 -> the number itself
/// - TRUE / FALSE -> 1 / 0
/// - "1", " 0 " -> the parsed number
/// - blank or non-numeric text -> None
/// - "NaN", "inf" and other non-finite values -> None
pub fn parse_flag(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::Empty | Cell::Date(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Parse an ETD cell into a calendar date.
///
/// Date cells keep their date part; numbers are Excel serial dates;
/// text is tried against ISO and common export formats.
/// A non-empty value that is not a date is an error naming the 1-based sheet row.
pub fn parse_date(cell: &Cell, row: usize) -> Result<Option<NaiveDate>, ReconError> {
    let parsed = match cell {
        Cell::Empty => return Ok(None),
        Cell::Date(dt) => Some(dt.date()),
        Cell::Number(n) => excel_serial_to_date(*n),
        Cell::Text(s) => parse_date_text(s),
        Cell::Bool(_) => None,
    };
    match parsed {
        Some(date) => Ok(Some(date)),
        None => Err(ReconError::InvalidDate {
            row,
            value: cell.to_string(),
        }),
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Excel's 1900 date system, counted from 1899-12-30 to absorb the leap-year bug.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
