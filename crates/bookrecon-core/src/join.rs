use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::{JoinedRecord, ReferenceRecord, ReferenceTable};
use crate::parsing::values::parse_date;
use crate::resolve::outcome::ResolvedRecord;

/// Left-join resolved rows to the reference table on booking number.
///
/// Produces exactly one joined row per resolved row. When several reference
/// rows share a booking, the first in sheet order is used. Unmatched rows
/// carry no reference fields and both flags read as 0.
///
/// ETD is parsed here, for matched rows only; a reference row nobody joins
/// may hold any value.
pub fn join(
    resolved: &[ResolvedRecord],
    reference: &ReferenceTable,
    booking_column: &str,
) -> Result<Vec<JoinedRecord>, ReconError> {
    if !reference.has_booking {
        return Err(ReconError::MissingColumn {
            column: booking_column.to_string(),
            file: "reference".into(),
        });
    }

    let mut by_booking: HashMap<&str, &ReferenceRecord> = HashMap::new();
    for record in &reference.records {
        if let Some(booking) = record.booking.as_deref() {
            by_booking.entry(booking).or_insert(record);
        }
    }

    let mut matched = 0usize;
    let mut joined = Vec::with_capacity(resolved.len());
    for row in resolved {
        let hit = row
            .booking_number
            .as_deref()
            .and_then(|b| by_booking.get(b).copied());
        if hit.is_some() {
            matched += 1;
        }
        joined.push(joined_row(row, hit)?);
    }

    tracing::info!(rows = joined.len(), matched, "joined with reference data");
    Ok(joined)
}

fn joined_row(
    row: &ResolvedRecord,
    hit: Option<&ReferenceRecord>,
) -> Result<JoinedRecord, ReconError> {
    let joined = match hit {
        Some(r) => JoinedRecord {
            subject: row.subject.clone(),
            office: row.office.clone(),
            booking_number: row.booking_number.clone(),
            booking: r.booking.clone(),
            doc_receive: r.doc_receive.unwrap_or(0.0),
            posted: r.posted.unwrap_or(0.0),
            disposition: r.disposition.clone(),
            status: r.status.clone(),
            etd: parse_date(&r.etd, r.row)?,
        },
        None => JoinedRecord {
            subject: row.subject.clone(),
            office: row.office.clone(),
            booking_number: row.booking_number.clone(),
            booking: None,
            doc_receive: 0.0,
            posted: 0.0,
            disposition: None,
            status: None,
            etd: None,
        },
    };
    Ok(joined)
}
