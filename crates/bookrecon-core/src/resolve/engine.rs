use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::model::ReferenceTable;
use crate::resolve::outcome::{Resolution, ResolutionMethod};

/// Full booking number: three letters, three letters, seven digits.
static BOOKING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{3}/[A-Z]{3}/\d{7}").expect("valid booking pattern"));

/// House bill of lading: same letter groups, five digits.
static HOUSE_BL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{3}/[A-Z]{3}/\d{5}").expect("valid house BL pattern"));

/// First occurrence of every house BL in the reference table, keyed by trimmed value.
///
/// The first row wins even when its booking cell is blank.
/// `None` when the table cannot be searched (no house BL or no booking column).
#[derive(Debug, Clone)]
pub struct HouseBlIndex {
    bookings: Option<HashMap<String, Option<String>>>,
}

impl HouseBlIndex {
    pub fn build(reference: &ReferenceTable) -> Self {
        if !reference.has_house_bl || !reference.has_booking {
            return Self { bookings: None };
        }

        let mut bookings = HashMap::new();
        for record in &reference.records {
            let Some(house_bl) = &record.house_bl else {
                continue;
            };
            bookings
                .entry(house_bl.trim().to_string())
                .or_insert_with(|| record.booking.clone());
        }

        Self {
            bookings: Some(bookings),
        }
    }

    pub fn is_available(&self) -> bool {
        self.bookings.is_some()
    }

    /// Booking of the first row carrying `house_bl`.
    ///
    /// Matching is exact and case-sensitive after trimming. The outer `None`
    /// means no row has the house BL; `Some(None)` means the first such row
    /// has a blank booking.
    pub fn lookup(&self, house_bl: &str) -> Option<Option<&str>> {
        self.bookings
            .as_ref()?
            .get(house_bl.trim())
            .map(Option::as_deref)
    }

    pub fn len(&self) -> usize {
        self.bookings.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Extracts booking numbers from subject lines.
#[derive(Debug, Clone)]
pub struct BookingResolver {
    index: HouseBlIndex,
}

impl BookingResolver {
    pub fn new(reference: &ReferenceTable) -> Self {
        Self {
            index: HouseBlIndex::build(reference),
        }
    }

    pub fn from_index(index: HouseBlIndex) -> Self {
        Self { index }
    }

    /// Resolve one subject line.
    ///
    /// A full booking number wins over a house BL. A house BL only resolves
    /// through the reference table.
    pub fn resolve(&self, subject: &str) -> Resolution {
        if let Some(m) = BOOKING_PATTERN.find(subject) {
            return Resolution {
                booking_number: Some(m.as_str().to_string()),
                method: ResolutionMethod::Direct,
            };
        }

        let Some(m) = HOUSE_BL_PATTERN.find(subject) else {
            return Resolution {
                booking_number: None,
                method: ResolutionMethod::NoIdentifier,
            };
        };
        let house_bl = m.as_str().to_string();

        if !self.index.is_available() {
            return Resolution {
                booking_number: None,
                method: ResolutionMethod::LookupUnavailable { house_bl },
            };
        }

        match self.index.lookup(&house_bl) {
            Some(booking) => Resolution {
                booking_number: booking.map(str::to_string),
                method: ResolutionMethod::HouseBl { house_bl },
            },
            None => Resolution {
                booking_number: None,
                method: ResolutionMethod::UnknownHouseBl { house_bl },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceRecord;

    fn reference(rows: &[(&str, &str)]) -> ReferenceTable {
        ReferenceTable {
            records: rows
                .iter()
                .map(|(house_bl, booking)| ReferenceRecord {
                    house_bl: Some(house_bl.to_string()),
                    booking: Some(booking.to_string()),
                    ..Default::default()
                })
                .collect(),
            has_house_bl: true,
            has_booking: true,
        }
    }

    #[test]
    fn test_direct_booking_number() {
        let resolver = BookingResolver::new(&reference(&[]));
        let r = resolver.resolve("ABC/DEF/1234567");
        assert_eq!(r.booking_number.as_deref(), Some("ABC/DEF/1234567"));
        assert_eq!(r.method, ResolutionMethod::Direct);
    }

    #[test]
    fn test_direct_match_ignores_house_bl_table() {
        // The house BL prefix of a full booking number is never looked up.
        let resolver = BookingResolver::new(&reference(&[("ABC/DEF/12345", "XYZ999")]));
        let r = resolver.resolve("Fwd: ABC/DEF/1234567 arrival");
        assert_eq!(r.booking_number.as_deref(), Some("ABC/DEF/1234567"));
    }

    #[test]
    fn test_first_booking_number_wins() {
        let resolver = BookingResolver::new(&reference(&[]));
        let r = resolver.resolve("AAA/BBB/1111111 and CCC/DDD/2222222");
        assert_eq!(r.booking_number.as_deref(), Some("AAA/BBB/1111111"));
    }

    #[test]
    fn test_house_bl_lookup() {
        let resolver = BookingResolver::new(&reference(&[("ABC/DEF/12345", "XYZ999")]));
        let r = resolver.resolve("ABC/DEF/12345");
        assert_eq!(r.booking_number.as_deref(), Some("XYZ999"));
        assert_eq!(
            r.method,
            ResolutionMethod::HouseBl {
                house_bl: "ABC/DEF/12345".into()
            }
        );
    }

    #[test]
    fn test_house_bl_lookup_trims_reference() {
        let resolver = BookingResolver::new(&reference(&[("  ABC/DEF/12345 ", "XYZ999")]));
        let r = resolver.resolve("shipment ABC/DEF/12345 released");
        assert_eq!(r.booking_number.as_deref(), Some("XYZ999"));
    }

    #[test]
    fn test_house_bl_is_case_sensitive() {
        let resolver = BookingResolver::new(&reference(&[("abc/def/12345", "XYZ999")]));
        let r = resolver.resolve("ABC/DEF/12345");
        assert_eq!(r.booking_number, None);
        assert!(matches!(r.method, ResolutionMethod::UnknownHouseBl { .. }));
    }

    #[test]
    fn test_first_house_bl_row_wins() {
        let resolver = BookingResolver::new(&reference(&[
            ("ABC/DEF/12345", "FIRST"),
            ("ABC/DEF/12345", "SECOND"),
        ]));
        let r = resolver.resolve("ABC/DEF/12345");
        assert_eq!(r.booking_number.as_deref(), Some("FIRST"));
    }

    #[test]
    fn test_lowercase_subject_has_no_identifier() {
        let resolver = BookingResolver::new(&reference(&[]));
        let r = resolver.resolve("abc/def/1234567");
        assert_eq!(r.booking_number, None);
        assert_eq!(r.method, ResolutionMethod::NoIdentifier);
    }

    #[test]
    fn test_lookup_skipped_without_house_bl_column() {
        let mut table = reference(&[("ABC/DEF/12345", "XYZ999")]);
        table.has_house_bl = false;
        let resolver = BookingResolver::new(&table);
        let r = resolver.resolve("ABC/DEF/12345");
        assert_eq!(r.booking_number, None);
        assert!(matches!(r.method, ResolutionMethod::LookupUnavailable { .. }));
    }

    #[test]
    fn test_first_row_wins_even_with_blank_booking() {
        let mut table = reference(&[("ABC/DEF/12345", "XYZ999")]);
        table.records.insert(
            0,
            ReferenceRecord {
                house_bl: Some("ABC/DEF/12345".into()),
                booking: None,
                ..Default::default()
            },
        );
        let index = HouseBlIndex::build(&table);
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup("ABC/DEF/12345"), Some(None));

        let r = BookingResolver::from_index(index).resolve("ABC/DEF/12345");
        assert_eq!(r.booking_number, None);
        assert!(r.method.is_found());
    }

    #[test]
    fn test_unknown_house_bl_lookup() {
        let index = HouseBlIndex::build(&reference(&[("ABC/DEF/12345", "XYZ999")]));
        assert_eq!(index.lookup("ABC/DEF/99999"), None);
    }
}
