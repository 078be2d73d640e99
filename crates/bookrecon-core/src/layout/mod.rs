pub mod builtin;
pub mod schema;

use crate::error::ReconError;
use schema::ColumnLayout;
use std::collections::HashSet;
use std::path::Path;

/// Load a column layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<ColumnLayout, ReconError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReconError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let layout: ColumnLayout =
        serde_json::from_str(&content).map_err(|e| ReconError::LayoutLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a column layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<ColumnLayout, ReconError> {
    let layout: ColumnLayout = serde_json::from_str(json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout names every column and sheet.
pub fn validate_layout(layout: &ColumnLayout) -> Result<(), ReconError> {
    if layout.sheet.trim().is_empty() {
        return Err(ReconError::LayoutInvalid(
            "sheet name must not be empty".into(),
        ));
    }

    let subjects = [
        ("subjects.subject", &layout.subjects.subject),
        ("subjects.office", &layout.subjects.office),
    ];
    let r = &layout.reference;
    let reference = [
        ("reference.house_bl", &r.house_bl),
        ("reference.booking", &r.booking),
        ("reference.doc_receive", &r.doc_receive),
        ("reference.posted", &r.posted),
        ("reference.status", &r.status),
        ("reference.disposition", &r.disposition),
        ("reference.etd", &r.etd),
    ];

    for (field, column) in subjects.iter().chain(reference.iter()) {
        if column.trim().is_empty() {
            return Err(ReconError::LayoutInvalid(format!(
                "{field} must name a column"
            )));
        }
    }

    let mut seen = HashSet::new();
    for (field, column) in &reference {
        if !seen.insert(column.trim()) {
            return Err(ReconError::LayoutInvalid(format!(
                "{field} reuses column '{column}'"
            )));
        }
    }

    if layout.status_values.pre_release.is_empty() || layout.status_values.loaded.is_empty() {
        return Err(ReconError::LayoutInvalid(
            "status values must not be empty".into(),
        ));
    }

    Ok(())
}
