// gcg_core/src/repo.rs
use serde_json::Value;
use std::path::PathBuf;

use crate::error::{GcgError, Result};

/// The named top-level arrays of the persisted document.
pub const COLLECTIONS: &[&str] = &[
    "users",
    "checklists",
    "userDocuments",
    "aoiTables",
    "aoiRecommendations",
    "strukturPerusahaan",
];

pub fn is_known_collection(name: &str) -> bool {
    COLLECTIONS.contains(&name)
}

pub(crate) fn ensure_known(name: &str) -> Result<()> {
    if is_known_collection(name) {
        Ok(())
    } else {
        Err(GcgError::NotFound(format!("collection '{name}'")))
    }
}

#[derive(Clone, Debug)]
pub struct OpenParams {
    pub db_path: PathBuf,
}

/// Untyped CRUD over named collections of JSON rows. Filters are exact
/// field=value matches against the row's top-level fields; ids compare by
/// their canonical string form so integer and string ids both work.
pub trait DocumentRepo: Send + Sync {
    fn list(&self, collection: &str, filters: &[(String, String)]) -> Result<Vec<Value>>;

    fn get(&self, collection: &str, id: &str) -> Result<Value>;

    /// Insert a row, assigning the next integer id when none is present.
    /// Returns the stored row.
    fn insert(&self, collection: &str, row: Value) -> Result<Value>;

    fn update(&self, collection: &str, id: &str, row: Value) -> Result<Value>;

    fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

pub(crate) fn ensure_object(row: &Value) -> Result<()> {
    if row.is_object() {
        Ok(())
    } else {
        Err(GcgError::Validation("row body must be a JSON object".into()))
    }
}

pub(crate) fn id_matches(row: &Value, id: &str) -> bool {
    match row.get("id") {
        Some(Value::Number(n)) => n.to_string() == id,
        Some(Value::String(s)) => s == id,
        _ => false,
    }
}

pub(crate) fn field_matches(field: Option<&Value>, raw: &str) -> bool {
    match field {
        Some(Value::Number(n)) => n.to_string() == raw,
        Some(Value::String(s)) => s == raw,
        Some(Value::Bool(b)) => b.to_string() == raw,
        _ => false,
    }
}

pub(crate) fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(k, v)| field_matches(row.get(k.as_str()), v))
}

/// Next integer id for a collection: one past the highest numeric id seen.
pub(crate) fn next_numeric_id(rows: &[Value]) -> i64 {
    rows.iter()
        .filter_map(|r| r.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}
