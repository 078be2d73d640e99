use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::model::JoinedRecord;

/// Yes / No / either selector for a 0/1 flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    Both,
    Yes,
    No,
}

impl TriState {
    pub fn accepts(self, flag: f64) -> bool {
        match self {
            TriState::Both => true,
            TriState::Yes => flag == 1.0,
            TriState::No => flag == 0.0,
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriState::Both => write!(f, "Both"),
            TriState::Yes => write!(f, "Yes"),
            TriState::No => write!(f, "No"),
        }
    }
}

impl FromStr for TriState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "both" | "any" => Ok(TriState::Both),
            "yes" | "y" | "1" => Ok(TriState::Yes),
            "no" | "n" | "0" => Ok(TriState::No),
            other => Err(format!("expected both, yes or no, got '{other}'")),
        }
    }
}

/// Row selection for the filtered booking view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected offices; `None` selects every office.
    pub offices: Option<BTreeSet<String>>,
    pub doc_received: TriState,
    pub posted: TriState,
}

impl FilterCriteria {
    pub fn matches(&self, row: &JoinedRecord) -> bool {
        if row.booking_number.is_none() {
            return false;
        }
        let office_selected = match &self.offices {
            None => true,
            Some(selected) => row
                .office
                .as_ref()
                .is_some_and(|office| selected.contains(office)),
        };
        office_selected
            && self.doc_received.accepts(row.doc_receive)
            && self.posted.accepts(row.posted)
    }
}

/// Rows passing `criteria`, in joined order. Rows without a booking number never pass.
pub fn apply(joined: &[JoinedRecord], criteria: &FilterCriteria) -> Vec<JoinedRecord> {
    let rows: Vec<JoinedRecord> = joined
        .iter()
        .filter(|row| criteria.matches(row))
        .cloned()
        .collect();
    tracing::debug!(selected = rows.len(), of = joined.len(), "applied booking filter");
    rows
}

/// Distinct offices in first-seen order, as offered by the office selector.
pub fn offices(joined: &[JoinedRecord]) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut offices = Vec::new();
    for office in joined.iter().filter_map(|row| row.office.as_deref()) {
        if seen.insert(office) {
            offices.push(office.to_string());
        }
    }
    offices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(office: &str, booking: Option<&str>, doc: f64, posted: f64) -> JoinedRecord {
        JoinedRecord {
            subject: String::new(),
            office: Some(office.into()),
            booking_number: booking.map(String::from),
            booking: booking.map(String::from),
            doc_receive: doc,
            posted,
            disposition: None,
            status: None,
            etd: None,
        }
    }

    fn sample() -> Vec<JoinedRecord> {
        vec![
            row("Oslo", Some("A"), 1.0, 1.0),
            row("Oslo", Some("B"), 0.0, 1.0),
            row("Bergen", Some("C"), 1.0, 0.0),
            row("Bergen", None, 1.0, 1.0),
        ]
    }

    fn bookings(rows: &[JoinedRecord]) -> Vec<&str> {
        rows.iter()
            .filter_map(|r| r.booking_number.as_deref())
            .collect()
    }

    #[test]
    fn test_default_criteria_drop_only_unresolved() {
        let rows = apply(&sample(), &FilterCriteria::default());
        assert_eq!(bookings(&rows), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_office_selection() {
        let criteria = FilterCriteria {
            offices: Some(BTreeSet::from(["Bergen".to_string()])),
            ..Default::default()
        };
        assert_eq!(bookings(&apply(&sample(), &criteria)), vec!["C"]);
    }

    #[test]
    fn test_empty_office_selection_selects_nothing() {
        let criteria = FilterCriteria {
            offices: Some(BTreeSet::new()),
            ..Default::default()
        };
        assert!(apply(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_flag_filters_are_independent() {
        let criteria = FilterCriteria {
            offices: None,
            doc_received: TriState::Yes,
            posted: TriState::No,
        };
        assert_eq!(bookings(&apply(&sample(), &criteria)), vec!["C"]);

        let criteria = FilterCriteria {
            offices: None,
            doc_received: TriState::No,
            posted: TriState::Both,
        };
        assert_eq!(bookings(&apply(&sample(), &criteria)), vec!["B"]);
    }

    #[test]
    fn test_flag_other_than_zero_or_one_matches_only_both() {
        let rows = vec![row("Oslo", Some("A"), 2.0, 0.0)];
        let yes = FilterCriteria {
            doc_received: TriState::Yes,
            ..Default::default()
        };
        let no = FilterCriteria {
            doc_received: TriState::No,
            ..Default::default()
        };
        assert!(apply(&rows, &yes).is_empty());
        assert!(apply(&rows, &no).is_empty());
        assert_eq!(apply(&rows, &FilterCriteria::default()).len(), 1);
    }

    #[test]
    fn test_tristate_parse() {
        assert_eq!("Yes".parse::<TriState>().unwrap(), TriState::Yes);
        assert_eq!(" no ".parse::<TriState>().unwrap(), TriState::No);
        assert_eq!("BOTH".parse::<TriState>().unwrap(), TriState::Both);
        assert!("maybe".parse::<TriState>().is_err());
    }

    #[test]
    fn test_offices_first_seen_order() {
        assert_eq!(offices(&sample()), vec!["Oslo", "Bergen"]);
    }
}
