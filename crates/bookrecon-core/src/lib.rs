pub mod drilldown;
pub mod error;
pub mod export;
pub mod extraction;
pub mod filter;
pub mod join;
pub mod layout;
pub mod model;
pub mod parsing;
pub mod resolve;
pub mod summary;

use error::ReconError;
use filter::FilterCriteria;
use layout::schema::ColumnLayout;
use model::JoinedRecord;
use resolve::outcome::ResolutionTally;
use serde::Serialize;
use summary::OfficeSummary;

/// Options for building a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub layout: ColumnLayout,
    /// Append a grand-total row to the office summary.
    pub with_totals: bool,
}

impl ReportOptions {
    pub fn new(layout: ColumnLayout) -> Self {
        Self {
            layout,
            with_totals: true,
        }
    }

    /// Options using the built-in column layout.
    pub fn with_default_layout() -> Result<Self, ReconError> {
        Ok(Self::new(layout::builtin::default_layout()?))
    }
}

/// Everything derived from one pair of input workbooks.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tally: ResolutionTally,
    pub joined: Vec<JoinedRecord>,
    pub summary: OfficeSummary,
}

impl Report {
    /// The filtered booking view for `criteria`.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<JoinedRecord> {
        filter::apply(&self.joined, criteria)
    }

    /// Distinct offices available for selection.
    pub fn offices(&self) -> Vec<String> {
        filter::offices(&self.joined)
    }
}

/// Main API entry point: reconcile a subject-line export against a booking
/// reference export.
///
/// Reads both workbooks, resolves a booking number for every subject row,
/// left-joins the reference data, and aggregates the office summary.
pub fn build_report(
    subjects_xlsx: &[u8],
    reference_xlsx: &[u8],
    options: &ReportOptions,
) -> Result<Report, ReconError> {
    let layout = &options.layout;

    let subjects_table = extraction::xlsx::read_table(subjects_xlsx, &layout.sheet)?;
    let reference_table = extraction::xlsx::read_table(reference_xlsx, &layout.sheet)?;

    let subjects = parsing::load_subjects(&subjects_table, &layout.subjects)?;
    let reference = parsing::load_reference(&reference_table, &layout.reference)?;

    reconcile(&subjects, &reference, options)
}

/// Resolve, join, and summarize already-loaded records.
pub fn reconcile(
    subjects: &[model::SubjectRecord],
    reference: &model::ReferenceTable,
    options: &ReportOptions,
) -> Result<Report, ReconError> {
    let layout = &options.layout;

    let (resolved, tally) = resolve::resolve_all(subjects, reference);
    let joined = join::join(&resolved, reference, &layout.reference.booking)?;
    let summary = summary::summarize(&joined, &layout.status_values, options.with_totals);

    Ok(Report {
        tally,
        joined,
        summary,
    })
}
