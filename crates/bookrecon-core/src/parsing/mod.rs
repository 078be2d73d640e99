pub mod values;

use crate::error::ReconError;
use crate::extraction::{Cell, Table};
use crate::layout::schema::{ReferenceColumns, SubjectColumns};
use crate::model::{ReferenceRecord, ReferenceTable, SubjectRecord};
use values::parse_flag;

/// Turn the subject-line sheet into typed records.
///
/// Both the subject and office columns are required.
pub fn load_subjects(
    table: &Table,
    columns: &SubjectColumns,
) -> Result<Vec<SubjectRecord>, ReconError> {
    let subject_col = require_column(table, &columns.subject, "subjects")?;
    let office_col = require_column(table, &columns.office, "subjects")?;

    let records: Vec<SubjectRecord> = (0..table.len())
        .map(|row| SubjectRecord {
            subject: table.cell(row, subject_col).to_string(),
            office: table.cell(row, office_col).as_text(),
        })
        .collect();

    tracing::info!(rows = records.len(), "loaded subject rows");
    Ok(records)
}

/// Turn the reference sheet into typed records.
///
/// Absent columns are not an error here: their fields stay `None` and the
/// resolver and join decide what a missing column means for them. ETD is kept
/// as stored so only rows that are actually joined need a valid date.
pub fn load_reference(
    table: &Table,
    columns: &ReferenceColumns,
) -> Result<ReferenceTable, ReconError> {
    let house_bl_col = table.column_index(&columns.house_bl);
    let booking_col = table.column_index(&columns.booking);
    let doc_col = table.column_index(&columns.doc_receive);
    let posted_col = table.column_index(&columns.posted);
    let disposition_col = table.column_index(&columns.disposition);
    let status_col = table.column_index(&columns.status);
    let etd_col = table.column_index(&columns.etd);

    let text = |row: usize, col: Option<usize>| col.and_then(|c| table.cell(row, c).as_text());

    let records: Vec<ReferenceRecord> = (0..table.len())
        .map(|row| ReferenceRecord {
            // +2: one for the header row, one for 1-based sheet rows.
            row: row + 2,
            booking: text(row, booking_col),
            house_bl: text(row, house_bl_col),
            doc_receive: doc_col.and_then(|c| parse_flag(table.cell(row, c))),
            posted: posted_col.and_then(|c| parse_flag(table.cell(row, c))),
            disposition: text(row, disposition_col),
            status: text(row, status_col),
            etd: etd_col.map_or(Cell::Empty, |c| table.cell(row, c).clone()),
        })
        .collect();

    if house_bl_col.is_none() {
        tracing::warn!(
            column = %columns.house_bl,
            "reference sheet has no house BL column, lookups disabled"
        );
    }
    tracing::info!(rows = records.len(), "loaded reference rows");

    Ok(ReferenceTable {
        records,
        has_house_bl: house_bl_col.is_some(),
        has_booking: booking_col.is_some(),
    })
}

fn require_column(table: &Table, column: &str, file: &str) -> Result<usize, ReconError> {
    table
        .column_index(column)
        .ok_or_else(|| ReconError::MissingColumn {
            column: column.to_string(),
            file: file.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin::default_layout;

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    #[test]
    fn test_load_subjects() {
        let layout = default_layout().unwrap();
        let table = Table {
            headers: vec!["Subject".into(), "Office".into(), "Received".into()],
            rows: vec![
                vec![text("RE: ABC/DEF/1234567 docs"), text("Oslo"), text("x")],
                vec![Cell::Empty, Cell::Empty],
            ],
        };
        let records = load_subjects(&table, &layout.subjects).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].subject, "RE: ABC/DEF/1234567 docs");
        assert_eq!(records[0].office.as_deref(), Some("Oslo"));
        assert_eq!(records[1].subject, "");
        assert_eq!(records[1].office, None);
    }

    #[test]
    fn test_missing_subject_column() {
        let layout = default_layout().unwrap();
        let table = Table {
            headers: vec!["Office".into()],
            rows: vec![],
        };
        match load_subjects(&table, &layout.subjects).unwrap_err() {
            ReconError::MissingColumn { column, file } => {
                assert_eq!(column, "Subject");
                assert_eq!(file, "subjects");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_reference_full_row() {
        let layout = default_layout().unwrap();
        let table = Table {
            headers: [
                "House BL",
                "Booking",
                "Office",
                "Doc Receive",
                "Posted",
                "Status",
                "Disposition",
                "ETD",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rows: vec![vec![
                text(" ABC/DEF/12345 "),
                text("ABC/DEF/7654321"),
                text("Oslo"),
                Cell::Number(1.0),
                Cell::Empty,
                text("Loaded"),
                text("Cleared"),
                text("2024-03-05"),
            ]],
        };
        let reference = load_reference(&table, &layout.reference).unwrap();
        assert!(reference.has_house_bl);
        assert!(reference.has_booking);
        let r = &reference.records[0];
        assert_eq!(r.row, 2);
        assert_eq!(r.house_bl.as_deref(), Some(" ABC/DEF/12345 "));
        assert_eq!(r.booking.as_deref(), Some("ABC/DEF/7654321"));
        assert_eq!(r.doc_receive, Some(1.0));
        assert_eq!(r.posted, None);
        assert_eq!(r.status.as_deref(), Some("Loaded"));
        assert_eq!(r.etd, text("2024-03-05"));
    }

    #[test]
    fn test_load_reference_without_lookup_columns() {
        let layout = default_layout().unwrap();
        let table = Table {
            headers: vec!["Status".into()],
            rows: vec![vec![text("Loaded")]],
        };
        let reference = load_reference(&table, &layout.reference).unwrap();
        assert!(!reference.has_house_bl);
        assert!(!reference.has_booking);
        assert_eq!(reference.records[0].status.as_deref(), Some("Loaded"));
        assert_eq!(reference.records[0].etd, Cell::Empty);
    }

    #[test]
    fn test_bad_etd_does_not_fail_load() {
        let layout = default_layout().unwrap();
        let table = Table {
            headers: vec!["Booking".into(), "ETD".into()],
            rows: vec![
                vec![text("A"), text("2024-01-01")],
                vec![text("B"), text("TBA")],
            ],
        };
        let reference = load_reference(&table, &layout.reference).unwrap();
        assert_eq!(reference.records[1].row, 3);
        assert_eq!(reference.records[1].etd, text("TBA"));
    }
}
