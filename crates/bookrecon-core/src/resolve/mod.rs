pub mod engine;
pub mod outcome;

use crate::model::{ReferenceTable, SubjectRecord};
use engine::BookingResolver;
use outcome::{ResolutionTally, ResolvedRecord};

/// Resolve every subject row against the reference table.
///
/// Returns the resolved rows in input order together with the found /
/// not-found tally for this pass. `tally.total()` always equals the number
/// of input rows.
pub fn resolve_all(
    subjects: &[SubjectRecord],
    reference: &ReferenceTable,
) -> (Vec<ResolvedRecord>, ResolutionTally) {
    let resolver = BookingResolver::new(reference);
    let mut tally = ResolutionTally::default();

    let resolved = subjects
        .iter()
        .map(|record| {
            let resolution = resolver.resolve(&record.subject);
            tally.record(&resolution);
            if !resolution.method.is_found() {
                tracing::debug!(
                    subject = %record.subject,
                    reason = %resolution.method,
                    "booking number not found"
                );
            }
            ResolvedRecord {
                subject: record.subject.clone(),
                office: record.office.clone(),
                booking_number: resolution.booking_number,
                method: resolution.method,
            }
        })
        .collect();

    tracing::info!(found = tally.found, not_found = tally.not_found, "resolved booking numbers");
    (resolved, tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceRecord;

    fn subject(s: &str) -> SubjectRecord {
        SubjectRecord {
            subject: s.into(),
            office: Some("Oslo".into()),
        }
    }

    #[test]
    fn test_tally_counts_every_row() {
        let reference = ReferenceTable {
            records: vec![ReferenceRecord {
                house_bl: Some("ABC/DEF/12345".into()),
                booking: Some("XYZ999".into()),
                ..Default::default()
            }],
            has_house_bl: true,
            has_booking: true,
        };
        let subjects = vec![
            subject("ABC/DEF/1234567"),
            subject("ABC/DEF/12345"),
            subject("GHI/JKL/54321"),
            subject("hello"),
            subject(""),
        ];

        let (resolved, tally) = resolve_all(&subjects, &reference);

        assert_eq!(resolved.len(), 5);
        assert_eq!(tally.found, 2);
        assert_eq!(tally.not_found, 3);
        assert_eq!(tally.total(), subjects.len());
        assert_eq!(resolved[1].booking_number.as_deref(), Some("XYZ999"));
        assert_eq!(resolved[3].booking_number, None);
        assert_eq!(resolved[0].office.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_house_bl_with_blank_booking_counts_as_found() {
        let reference = ReferenceTable {
            records: vec![
                ReferenceRecord {
                    house_bl: Some("ABC/DEF/12345".into()),
                    booking: None,
                    ..Default::default()
                },
                ReferenceRecord {
                    house_bl: Some("ABC/DEF/12345".into()),
                    booking: Some("LATER".into()),
                    ..Default::default()
                },
            ],
            has_house_bl: true,
            has_booking: true,
        };

        let (resolved, tally) = resolve_all(&[subject("ABC/DEF/12345")], &reference);

        assert_eq!(tally.found, 1);
        assert_eq!(tally.not_found, 0);
        assert_eq!(resolved[0].booking_number, None);
    }
}
