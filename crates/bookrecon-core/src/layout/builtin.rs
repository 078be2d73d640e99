use crate::error::ReconError;
use crate::layout::schema::ColumnLayout;

const DEFAULT_LAYOUT_JSON: &str = include_str!("default.json");

/// The layout of the standard Subject/Office and booking data exports.
pub fn default_layout() -> Result<ColumnLayout, ReconError> {
    let layout: ColumnLayout = serde_json::from_str(DEFAULT_LAYOUT_JSON)?;
    Ok(layout)
}

/// Raw JSON of the built-in layout, for `layout show`.
pub fn default_layout_json() -> &'static str {
    DEFAULT_LAYOUT_JSON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_column_names() {
        let layout = default_layout().unwrap();
        assert_eq!(layout.sheet, "Sheet1");
        assert_eq!(layout.subjects.subject, "Subject");
        assert_eq!(layout.reference.house_bl, "House BL");
        assert_eq!(layout.reference.doc_receive, "Doc Receive");
        assert_eq!(layout.status_values.pre_release, "Pre-Release");
    }

    #[test]
    fn test_default_layout_is_valid() {
        let layout = default_layout().unwrap();
        assert!(crate::layout::validate_layout(&layout).is_ok());
    }
}
