// gcg_core/src/domain.rs
use serde::{Deserialize, Serialize};

/// One row of the yearly GCG document checklist. Field names follow the
/// persisted JSON document (`aspek`, `deskripsi`, `tahun`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    /// Aspect label; absent or blank rows fall into the sentinel group.
    #[serde(default)]
    pub aspek: Option<String>,
    #[serde(default)]
    pub deskripsi: String,
    /// Fiscal year; legacy rows may miss it and are simply never selected.
    #[serde(default)]
    pub tahun: Option<i32>,
    #[serde(default)]
    pub status: ChecklistStatus,
    #[serde(default)]
    pub pic: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

/// A supporting-document upload record. `aspect` and `tahun` mirror the
/// owning checklist row but are display caches only; completion is always
/// decided through `checklist_id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub tahun: Option<i32>,
    #[serde(default)]
    pub checklist_id: Option<i64>,
    #[serde(default)]
    pub checklist_description: Option<String>,
    #[serde(default)]
    pub aspect: Option<String>,
    #[serde(default)]
    pub subdirektorat: Option<String>,
    #[serde(default)]
    pub catatan: Option<String>,
}

/// Wire shape of a file persisted by the upload store.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub original_name: String,
    pub filename: String,
    pub size: u64,
    pub mimetype: String,
    pub path: String,
    pub upload_date: String,
}
