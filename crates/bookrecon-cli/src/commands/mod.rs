pub mod bookings;
pub mod layout;
pub mod summary;

use bookrecon_core::error::ReconError;
use bookrecon_core::{Report, ReportOptions};

use crate::InputArgs;

/// Read both workbooks and build the report they describe.
pub fn load_report(input: &InputArgs, with_totals: bool) -> Result<Report, ReconError> {
    let mut layout = match &input.layout {
        Some(path) => bookrecon_core::layout::load_layout(path)?,
        None => bookrecon_core::layout::builtin::default_layout()?,
    };
    if let Some(ref sheet) = input.sheet {
        layout.sheet = sheet.clone();
    }

    let subjects = std::fs::read(&input.subjects)?;
    let reference = std::fs::read(&input.reference)?;

    let mut options = ReportOptions::new(layout);
    options.with_totals = with_totals;
    bookrecon_core::build_report(&subjects, &reference, &options)
}
