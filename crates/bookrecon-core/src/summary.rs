use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::layout::schema::StatusValues;
use crate::model::JoinedRecord;

/// Label of the grand-total row.
pub const TOTAL_LABEL: &str = "Total";

/// Metric column headers, in display order.
pub const METRIC_LABELS: [&str; 5] = [
    "Total Bookings",
    "Doc Received",
    "Posted",
    "Pre-Release",
    "Loaded",
];

/// A count and its share of the office's bookings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricCount {
    pub count: usize,
    /// `count / total * 100`; 0 when the total is 0.
    pub percent: f64,
}

impl MetricCount {
    pub fn new(count: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percent }
    }
}

impl fmt::Display for MetricCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.count, self.percent)
    }
}

/// One row of the office-wise summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeSummaryRow {
    pub office: String,
    pub total_bookings: usize,
    pub doc_received: MetricCount,
    pub posted: MetricCount,
    pub pre_release: MetricCount,
    pub loaded: MetricCount,
}

impl OfficeSummaryRow {
    fn from_counts(office: String, counts: &Counts) -> Self {
        let total = counts.total_bookings;
        Self {
            office,
            total_bookings: total,
            doc_received: MetricCount::new(counts.doc_received, total),
            posted: MetricCount::new(counts.posted, total),
            pre_release: MetricCount::new(counts.pre_release, total),
            loaded: MetricCount::new(counts.loaded, total),
        }
    }

    /// Display cells in `METRIC_LABELS` order.
    pub fn metric_cells(&self) -> [String; 5] {
        [
            self.total_bookings.to_string(),
            self.doc_received.to_string(),
            self.posted.to_string(),
            self.pre_release.to_string(),
            self.loaded.to_string(),
        ]
    }
}

/// Office-wise summary with an optional grand-total row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeSummary {
    /// One row per office, sorted by office name.
    pub offices: Vec<OfficeSummaryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<OfficeSummaryRow>,
}

/// The summary turned on its side: metrics as rows, offices as columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransposedSummary {
    pub columns: Vec<String>,
    pub rows: Vec<(String, Vec<String>)>,
}

impl OfficeSummary {
    /// Office rows followed by the total row, if present.
    pub fn rows(&self) -> impl Iterator<Item = &OfficeSummaryRow> {
        self.offices.iter().chain(self.total.iter())
    }

    pub fn transposed(&self) -> TransposedSummary {
        let columns = self.rows().map(|r| r.office.clone()).collect();
        let cells: Vec<[String; 5]> = self.rows().map(OfficeSummaryRow::metric_cells).collect();
        let rows = METRIC_LABELS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                (
                    label.to_string(),
                    cells.iter().map(|c| c[i].clone()).collect(),
                )
            })
            .collect();
        TransposedSummary { columns, rows }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    total_bookings: usize,
    doc_received: usize,
    posted: usize,
    pre_release: usize,
    loaded: usize,
}

impl Counts {
    fn add(&mut self, other: &Counts) {
        self.total_bookings += other.total_bookings;
        self.doc_received += other.doc_received;
        self.posted += other.posted;
        self.pre_release += other.pre_release;
        self.loaded += other.loaded;
    }
}

/// Aggregate joined rows per office.
///
/// `total_bookings` counts rows that matched a reference booking. Flags count
/// only when exactly 1; statuses count only on an exact string match. Rows
/// with no office are not grouped.
pub fn summarize(
    joined: &[JoinedRecord],
    status_values: &StatusValues,
    with_totals: bool,
) -> OfficeSummary {
    let mut by_office: BTreeMap<&str, Counts> = BTreeMap::new();

    for row in joined {
        let Some(office) = row.office.as_deref() else {
            continue;
        };
        let counts = by_office.entry(office).or_default();
        if row.booking.is_some() {
            counts.total_bookings += 1;
        }
        if row.doc_received() {
            counts.doc_received += 1;
        }
        if row.is_posted() {
            counts.posted += 1;
        }
        match row.status.as_deref() {
            Some(s) if s == status_values.pre_release => counts.pre_release += 1,
            Some(s) if s == status_values.loaded => counts.loaded += 1,
            _ => {}
        }
    }

    let total = with_totals.then(|| {
        let mut grand = Counts::default();
        for counts in by_office.values() {
            grand.add(counts);
        }
        OfficeSummaryRow::from_counts(TOTAL_LABEL.to_string(), &grand)
    });

    let offices = by_office
        .iter()
        .map(|(office, counts)| OfficeSummaryRow::from_counts(office.to_string(), counts))
        .collect();

    OfficeSummary { offices, total }
}
