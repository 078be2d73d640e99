use bookrecon_core::error::ReconError;

use crate::output;
use crate::InputArgs;

pub fn run(
    input: &InputArgs,
    with_totals: bool,
    transpose: bool,
    output_format: &str,
) -> Result<(), ReconError> {
    let report = super::load_report(input, with_totals)?;

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "tally": report.tally,
            "summary": report.summary,
        }))?,
        _ => {
            output::table::print_tally(&report.tally);
            if transpose {
                output::table::print_transposed(&report.summary.transposed());
            } else {
                output::table::print_summary(&report.summary);
            }
        }
    }

    Ok(())
}
