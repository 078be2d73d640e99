use serde::{Deserialize, Serialize};
use std::fmt;

/// How a subject line produced (or failed to produce) a booking number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// The subject contained a full booking number.
    Direct,
    /// The subject contained a house BL found in the reference table. The
    /// booking is whatever the first matching row holds, possibly blank.
    HouseBl { house_bl: String },
    /// A house BL was found but the reference table has no row for it.
    UnknownHouseBl { house_bl: String },
    /// A house BL was found but the reference table cannot be searched by house BL.
    LookupUnavailable { house_bl: String },
    /// Neither identifier shape appears in the subject.
    NoIdentifier,
}

impl ResolutionMethod {
    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionMethod::Direct | ResolutionMethod::HouseBl { .. })
    }
}

impl fmt::Display for ResolutionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMethod::Direct => write!(f, "booking number in subject"),
            ResolutionMethod::HouseBl { house_bl } => write!(f, "house BL {house_bl}"),
            ResolutionMethod::UnknownHouseBl { house_bl } => {
                write!(f, "house BL {house_bl} not in reference data")
            }
            ResolutionMethod::LookupUnavailable { house_bl } => {
                write!(
                    f,
                    "house BL {house_bl} found but reference data has no house BL/booking columns"
                )
            }
            ResolutionMethod::NoIdentifier => write!(f, "no booking number or house BL in subject"),
        }
    }
}

/// Result of resolving a single subject line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub booking_number: Option<String>,
    pub method: ResolutionMethod,
}

/// A subject row with its resolution attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub subject: String,
    pub office: Option<String>,
    pub booking_number: Option<String>,
    pub method: ResolutionMethod,
}

/// Found / not-found counts for one resolution pass.
///
/// A house BL that matches a reference row counts as found even when that
/// row's booking is blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTally {
    pub found: usize,
    pub not_found: usize,
}

impl ResolutionTally {
    pub fn record(&mut self, resolution: &Resolution) {
        if resolution.method.is_found() {
            self.found += 1;
        } else {
            self.not_found += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.found + self.not_found
    }
}
