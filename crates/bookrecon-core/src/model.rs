use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extraction::Cell;

/// One row of the subject-line export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Free-text subject line; empty when the cell was blank.
    pub subject: String,
    pub office: Option<String>,
}

/// One row of the booking reference export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceRecord {
    /// 1-based row in the sheet, header included.
    pub row: usize,
    pub booking: Option<String>,
    pub house_bl: Option<String>,
    /// 0/1 flag as stored in the sheet; `None` when blank.
    pub doc_receive: Option<f64>,
    pub posted: Option<f64>,
    pub disposition: Option<String>,
    pub status: Option<String>,
    /// ETD exactly as stored; parsed when the row is joined.
    pub etd: Cell,
}

/// The reference export plus which of the lookup columns it actually has.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    pub records: Vec<ReferenceRecord>,
    pub has_house_bl: bool,
    pub has_booking: bool,
}

/// A subject row joined with its reference row (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub subject: String,
    /// Office of the subject row; this is the grouping key.
    pub office: Option<String>,
    /// Booking number resolved from the subject line.
    pub booking_number: Option<String>,
    /// Booking of the matched reference row; `None` when the join found nothing.
    pub booking: Option<String>,
    /// Flags default to 0 when unmatched or blank.
    pub doc_receive: f64,
    pub posted: f64,
    pub disposition: Option<String>,
    pub status: Option<String>,
    pub etd: Option<NaiveDate>,
}

impl JoinedRecord {
    pub fn doc_received(&self) -> bool {
        self.doc_receive == 1.0
    }

    pub fn is_posted(&self) -> bool {
        self.posted == 1.0
    }
}
