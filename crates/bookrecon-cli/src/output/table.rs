use bookrecon_core::drilldown::OfficeBreakdown;
use bookrecon_core::model::JoinedRecord;
use bookrecon_core::resolve::outcome::ResolutionTally;
use bookrecon_core::summary::{OfficeSummary, TransposedSummary, METRIC_LABELS};

pub fn print_tally(tally: &ResolutionTally) {
    println!("Total Booking Numbers Found: {}", tally.found);
    println!("Total Booking Numbers Not Found: {}\n", tally.not_found);
}

pub fn print_summary(summary: &OfficeSummary) {
    println!("=== Office-Wise Summary ===\n");

    let mut header = vec!["Office".to_string()];
    header.extend(METRIC_LABELS.iter().map(|s| s.to_string()));

    let rows: Vec<Vec<String>> = summary
        .rows()
        .map(|row| {
            let mut cells = vec![row.office.clone()];
            cells.extend(row.metric_cells());
            cells
        })
        .collect();

    print_grid(&header, &rows);
    println!();
}

pub fn print_transposed(summary: &TransposedSummary) {
    println!("=== Office-Wise Summary ===\n");

    let mut header = vec![String::new()];
    header.extend(summary.columns.iter().cloned());

    let rows: Vec<Vec<String>> = summary
        .rows
        .iter()
        .map(|(label, cells)| {
            let mut row = vec![label.clone()];
            row.extend(cells.iter().cloned());
            row
        })
        .collect();

    print_grid(&header, &rows);
    println!();
}

pub fn print_bookings(view: &[JoinedRecord]) {
    println!("=== Filtered Booking Numbers ({}) ===\n", view.len());
    if view.is_empty() {
        println!("  No bookings match the selected filters.\n");
        return;
    }

    let header: Vec<String> = ["Booking Number", "Office", "ETD", "Doc Receive", "Posted"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = view
        .iter()
        .map(|r| {
            vec![
                r.booking_number.clone().unwrap_or_default(),
                r.office.clone().unwrap_or_default(),
                r.etd.map(|d| d.to_string()).unwrap_or_default(),
                format_flag(r.doc_receive),
                format_flag(r.posted),
            ]
        })
        .collect();

    print_grid(&header, &rows);
    println!();
}

pub fn print_breakdown(breakdown: &[OfficeBreakdown]) {
    for office in breakdown {
        println!("--- {} - {} ---", office.office, office.dimension);
        for vc in &office.counts {
            println!("  {}: {}", vc.value, vc.count);
        }
        println!();
    }
}

fn format_flag(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn print_grid(header: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        println!("  {}", padded.join("  ").trim_end());
    };

    line(header);
    println!(
        "  {}",
        "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1))
    );
    for row in rows {
        line(row);
    }
}
