use serde::{Deserialize, Serialize};

/// Where each field lives in the two input workbooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Sheet read from both workbooks.
    #[serde(default = "default_sheet")]
    pub sheet: String,
    pub subjects: SubjectColumns,
    pub reference: ReferenceColumns,
    #[serde(default)]
    pub status_values: StatusValues,
}

/// Columns of the subject-line export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectColumns {
    pub subject: String,
    pub office: String,
}

/// Columns of the booking reference export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceColumns {
    pub house_bl: String,
    pub booking: String,
    pub doc_receive: String,
    pub posted: String,
    pub status: String,
    pub disposition: String,
    pub etd: String,
}

/// Status literals counted by the office summary. Matching is exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusValues {
    pub pre_release: String,
    pub loaded: String,
}

impl Default for StatusValues {
    fn default() -> Self {
        Self {
            pre_release: "Pre-Release".into(),
            loaded: "Loaded".into(),
        }
    }
}

fn default_sheet() -> String {
    "Sheet1".into()
}
