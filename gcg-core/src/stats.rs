//! Year-scoped completion statistics over the checklist and upload stores.
//!
//! All computations here are pure: filter both collections to the selected
//! year, decide "uploaded" membership strictly by `checklist_id` (the
//! denormalized `aspect` string on an upload record is never consulted), and
//! de-duplicate re-uploads so a second file against the same checklist row
//! cannot inflate counts or byte totals.

use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{ChecklistItem, UploadedFile};
use crate::error::Result;
use crate::repo::DocumentRepo;

/// Group label for checklist rows with an absent or blank aspect.
pub const SENTINEL_ASPEK: &str = "Dokumen Tanpa Aspek";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_checklist: u64,
    pub uploaded_count: u64,
    pub pending_count: u64,
    /// Rounded percentage in 0..=100; 0 when the year has no rows.
    pub progress: u8,
    pub total_size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectStat {
    /// Normalized label; blank aspects surface as [`SENTINEL_ASPEK`].
    pub aspek: String,
    /// The raw aspect value, kept for navigation targets. None for the
    /// sentinel group.
    pub original_aspek: Option<String>,
    pub total_items: u64,
    pub uploaded_count: u64,
    pub pending_count: u64,
    pub progress: u8,
}

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("collection '{0}' is not an array")]
    NotAnArray(String),
}

fn is_blank(aspek: Option<&str>) -> bool {
    aspek.is_none_or(|a| a.trim().is_empty())
}

fn rounded_pct(part: u64, whole: u64) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}

/// One upload record per checklist id, first occurrence in stored order.
/// Records whose `checklist_id` is absent or outside `ids` are dropped.
fn dedup_uploads<'a>(
    files: &'a [UploadedFile],
    ids: &HashSet<i64>,
) -> HashMap<i64, &'a UploadedFile> {
    let mut by_id: HashMap<i64, &UploadedFile> = HashMap::new();
    for f in files {
        if let Some(cid) = f.checklist_id {
            if ids.contains(&cid) {
                by_id.entry(cid).or_insert(f);
            }
        }
    }
    by_id
}

/// Overall completion for one year. A `None` year yields the zeroed result.
pub fn overall_stats(
    year: Option<i32>,
    items: &[ChecklistItem],
    files: &[UploadedFile],
) -> OverallStats {
    let Some(year) = year else {
        return OverallStats::default();
    };
    let year_items: Vec<&ChecklistItem> =
        items.iter().filter(|i| i.tahun == Some(year)).collect();
    let ids: HashSet<i64> = year_items.iter().map(|i| i.id).collect();
    let uploads = dedup_uploads(files, &ids);

    let total_checklist = year_items.len() as u64;
    let uploaded_count = year_items
        .iter()
        .filter(|i| uploads.contains_key(&i.id))
        .count() as u64;
    let total_size = uploads.values().map(|f| f.file_size).sum();

    OverallStats {
        total_checklist,
        uploaded_count,
        pending_count: total_checklist - uploaded_count,
        progress: rounded_pct(uploaded_count, total_checklist),
        total_size,
    }
}

/// Per-aspect completion for one year, sorted by descending progress.
///
/// Groups appear in first-encounter order while scanning the filtered
/// checklist rows; the sort is stable, so equal-progress groups keep that
/// order. Blank aspects collapse into a single sentinel group.
pub fn aspect_stats(
    year: Option<i32>,
    items: &[ChecklistItem],
    files: &[UploadedFile],
) -> Vec<AspectStat> {
    let Some(year) = year else {
        return Vec::new();
    };
    let year_items: Vec<&ChecklistItem> =
        items.iter().filter(|i| i.tahun == Some(year)).collect();
    let ids: HashSet<i64> = year_items.iter().map(|i| i.id).collect();
    let uploads = dedup_uploads(files, &ids);

    // Group keys in discovery order. Key None = sentinel group.
    let mut order: Vec<Option<&str>> = Vec::new();
    let mut groups: HashMap<Option<&str>, Vec<&ChecklistItem>> = HashMap::new();
    for &item in &year_items {
        let key = if is_blank(item.aspek.as_deref()) {
            None
        } else {
            item.aspek.as_deref()
        };
        if !groups.contains_key(&key) {
            order.push(key);
        }
        groups.entry(key).or_default().push(item);
    }

    let mut stats: Vec<AspectStat> = order
        .into_iter()
        .map(|key| {
            let members = &groups[&key];
            let total_items = members.len() as u64;
            let uploaded_count = members
                .iter()
                .filter(|i| uploads.contains_key(&i.id))
                .count() as u64;
            AspectStat {
                aspek: key.unwrap_or(SENTINEL_ASPEK).to_string(),
                original_aspek: key.map(str::to_string),
                total_items,
                uploaded_count,
                pending_count: total_items - uploaded_count,
                progress: rounded_pct(uploaded_count, total_items),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.progress.cmp(&a.progress));
    stats
}

/// Decode rows leniently: a row that fails to deserialize is logged and
/// skipped so one malformed record cannot blank the whole dashboard.
pub fn decode_rows<T: DeserializeOwned>(collection: &str, rows: &[Value]) -> Vec<T> {
    rows.iter()
        .filter_map(|row| match serde_json::from_value(row.clone()) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(collection, %err, "skipping malformed row");
                None
            }
        })
        .collect()
}

/// Decode a whole named collection out of a raw document. Collection-level
/// shape failure is explicit; row-level failure degrades via [`decode_rows`].
pub fn decode_collection<T: DeserializeOwned>(
    collection: &str,
    raw: &Value,
) -> std::result::Result<Vec<T>, AggregationError> {
    let rows = raw
        .as_array()
        .ok_or_else(|| AggregationError::NotAnArray(collection.to_string()))?;
    Ok(decode_rows(collection, rows))
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub overall: OverallStats,
    pub aspects: Vec<AspectStat>,
}

/// Load both stores from the repository and aggregate for one year.
pub fn report_for_year(repo: &dyn DocumentRepo, year: Option<i32>) -> Result<StatsReport> {
    let items_raw = repo.list("checklists", &[])?;
    let files_raw = repo.list("userDocuments", &[])?;
    let items: Vec<ChecklistItem> = decode_rows("checklists", &items_raw);
    let files: Vec<UploadedFile> = decode_rows("userDocuments", &files_raw);
    Ok(StatsReport {
        overall: overall_stats(year, &items, &files),
        aspects: aspect_stats(year, &items, &files),
    })
}
