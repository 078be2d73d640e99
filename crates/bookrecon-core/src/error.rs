use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    #[error("'{column}' column not found in the {file} file")]
    MissingColumn { column: String, file: String },

    #[error("invalid ETD value '{value}' in row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("failed to load column layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid column layout: {0}")]
    LayoutInvalid(String),

    #[error("failed to write export workbook: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rust_xlsxwriter::XlsxError> for ReconError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ReconError::Export(e.to_string())
    }
}
