use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::model::JoinedRecord;

/// Categorical field to break bookings down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Disposition,
    Status,
}

impl Dimension {
    pub fn value_of(self, row: &JoinedRecord) -> Option<&str> {
        match self {
            Dimension::Disposition => row.disposition.as_deref(),
            Dimension::Status => row.status.as_deref(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Disposition => write!(f, "Disposition"),
            Dimension::Status => write!(f, "Status"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disposition" => Ok(Dimension::Disposition),
            "status" => Ok(Dimension::Status),
            other => Err(format!("expected disposition or status, got '{other}'")),
        }
    }
}

/// Count of bookings with one value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Per-office value counts for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeBreakdown {
    pub office: String,
    pub dimension: Dimension,
    /// Non-zero counts, sorted by value.
    pub counts: Vec<ValueCount>,
}

/// Count each value of `dimension` per office.
///
/// Offices and values are sorted. Rows without an office or without a value
/// for the dimension are not counted.
pub fn breakdown(view: &[JoinedRecord], dimension: Dimension) -> Vec<OfficeBreakdown> {
    let mut grouped: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for row in view {
        let (Some(office), Some(value)) = (row.office.as_deref(), dimension.value_of(row)) else {
            continue;
        };
        *grouped.entry(office).or_default().entry(value).or_default() += 1;
    }

    grouped
        .into_iter()
        .map(|(office, values)| OfficeBreakdown {
            office: office.to_string(),
            dimension,
            counts: values
                .into_iter()
                .map(|(value, count)| ValueCount {
                    value: value.to_string(),
                    count,
                })
                .collect(),
        })
        .collect()
}

/// Booking numbers in `office` whose `dimension` equals `value`, in view order.
pub fn bookings_for(
    view: &[JoinedRecord],
    office: &str,
    dimension: Dimension,
    value: &str,
) -> Vec<String> {
    view.iter()
        .filter(|row| row.office.as_deref() == Some(office))
        .filter(|row| dimension.value_of(row) == Some(value))
        .filter_map(|row| row.booking_number.clone())
        .collect()
}
