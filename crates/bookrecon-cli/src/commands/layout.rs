use bookrecon_core::error::ReconError;
use bookrecon_core::layout::builtin;
use std::path::Path;

pub fn show() -> Result<(), ReconError> {
    print!("{}", builtin::default_layout_json());
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ReconError> {
    let layout = bookrecon_core::layout::load_layout(file)?;

    println!("Layout '{}' is valid.", layout.name);
    println!("  Sheet: {}", layout.sheet);
    println!(
        "  Subjects: subject='{}', office='{}'",
        layout.subjects.subject, layout.subjects.office
    );
    let r = &layout.reference;
    println!(
        "  Reference: house_bl='{}', booking='{}', doc_receive='{}', posted='{}'",
        r.house_bl, r.booking, r.doc_receive, r.posted
    );
    println!(
        "             status='{}', disposition='{}', etd='{}'",
        r.status, r.disposition, r.etd
    );

    // Same literal for both statuses is allowed but makes one column always zero.
    if layout.status_values.pre_release == layout.status_values.loaded {
        println!("\nWarnings:");
        println!(
            "  - pre-release and loaded both match '{}'; the Loaded column will always be 0",
            layout.status_values.loaded
        );
    }

    Ok(())
}
