use bookrecon_core::drilldown::{self, Dimension};
use bookrecon_core::error::ReconError;
use bookrecon_core::export;
use bookrecon_core::filter::FilterCriteria;
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::output;
use crate::{FlagArgs, InputArgs};

pub fn run(
    input: &InputArgs,
    offices: Vec<String>,
    flags: &FlagArgs,
    breakdown: bool,
    export_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), ReconError> {
    let report = super::load_report(input, false)?;
    let criteria = criteria(offices, flags);
    let view = report.filter(&criteria);

    let breakdowns = if breakdown {
        vec![
            drilldown::breakdown(&view, Dimension::Disposition),
            drilldown::breakdown(&view, Dimension::Status),
        ]
    } else {
        Vec::new()
    };

    match output_format {
        "json" => output::json::print(&serde_json::json!({
            "criteria": criteria,
            "bookings": view,
            "breakdowns": breakdowns,
        }))?,
        _ => {
            output::table::print_bookings(&view);
            for b in &breakdowns {
                output::table::print_breakdown(b);
            }
        }
    }

    if let Some(path) = export_file {
        export::write_filtered_xlsx_file(&view, &path)?;
        eprintln!(
            "Exported {} booking(s) to {} ({})",
            view.len(),
            path.display(),
            export::XLSX_MIME_TYPE
        );
    }

    Ok(())
}

pub fn drill(
    input: &InputArgs,
    office: &str,
    flags: &FlagArgs,
    dimension: Dimension,
    value: &str,
) -> Result<(), ReconError> {
    let report = super::load_report(input, false)?;
    let view = report.filter(&criteria(vec![office.to_string()], flags));
    let bookings = drilldown::bookings_for(&view, office, dimension, value);

    println!("Booking Numbers for {value} ({dimension}) in {office}:");
    if bookings.is_empty() {
        println!("  (none)");
    }
    for booking in &bookings {
        println!("  {booking}");
    }

    Ok(())
}

fn criteria(offices: Vec<String>, flags: &FlagArgs) -> FilterCriteria {
    FilterCriteria {
        offices: if offices.is_empty() {
            None
        } else {
            Some(offices.into_iter().collect::<BTreeSet<_>>())
        },
        doc_received: flags.doc_received,
        posted: flags.posted,
    }
}
