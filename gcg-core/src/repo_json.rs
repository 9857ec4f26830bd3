//! Flat-file backend: one JSON object of named arrays, the legacy `db.json`
//! layout. The whole document lives in memory; every mutation rewrites the
//! file atomically through a temp file in the same directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value, json};

use crate::error::{GcgError, Result};
use crate::repo::{
    DocumentRepo, ensure_known, ensure_object, id_matches, next_numeric_id, row_matches,
};

pub struct JsonDocumentRepo {
    path: PathBuf,
    doc: Mutex<Map<String, Value>>,
}

impl JsonDocumentRepo {
    /// Open an existing document, or start empty when the file is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = if path.exists() {
            let bytes = std::fs::read(path)?;
            match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => map,
                other => {
                    return Err(GcgError::Format(format!(
                        "document root must be an object, got {other}"
                    )));
                }
            }
        } else {
            Map::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            doc: Mutex::new(doc),
        })
    }

    fn persist(&self, doc: &Map<String, Value>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &Value::Object(doc.clone()))?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| GcgError::Io(e.error))?;
        Ok(())
    }

    fn rows<'a>(doc: &'a Map<String, Value>, collection: &str) -> Result<&'a [Value]> {
        match doc.get(collection) {
            None => Ok(&[]),
            Some(Value::Array(rows)) => Ok(rows),
            Some(_) => Err(GcgError::Format(format!(
                "collection '{collection}' is not an array"
            ))),
        }
    }
}

impl DocumentRepo for JsonDocumentRepo {
    fn list(&self, collection: &str, filters: &[(String, String)]) -> Result<Vec<Value>> {
        ensure_known(collection)?;
        let doc = self.doc.lock().expect("repo lock");
        let rows = Self::rows(&doc, collection)?;
        Ok(rows
            .iter()
            .filter(|r| row_matches(r, filters))
            .cloned()
            .collect())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Value> {
        ensure_known(collection)?;
        let doc = self.doc.lock().expect("repo lock");
        Self::rows(&doc, collection)?
            .iter()
            .find(|r| id_matches(r, id))
            .cloned()
            .ok_or_else(|| GcgError::NotFound(format!("{collection}/{id}")))
    }

    fn insert(&self, collection: &str, mut row: Value) -> Result<Value> {
        ensure_known(collection)?;
        ensure_object(&row)?;
        let mut doc = self.doc.lock().expect("repo lock");
        if !matches!(doc.get(collection), Some(Value::Array(_))) {
            doc.insert(collection.to_string(), json!([]));
        }
        {
            let rows = Self::rows(&doc, collection)?;
            if row.get("id").is_none_or(Value::is_null) {
                let next = next_numeric_id(rows);
                row["id"] = json!(next);
            }
        }
        let stored = row.clone();
        doc.get_mut(collection)
            .and_then(Value::as_array_mut)
            .expect("collection array")
            .push(row);
        self.persist(&doc)?;
        Ok(stored)
    }

    fn update(&self, collection: &str, id: &str, mut row: Value) -> Result<Value> {
        ensure_known(collection)?;
        ensure_object(&row)?;
        let mut doc = self.doc.lock().expect("repo lock");
        let idx = Self::rows(&doc, collection)?
            .iter()
            .position(|r| id_matches(r, id))
            .ok_or_else(|| GcgError::NotFound(format!("{collection}/{id}")))?;
        let rows = doc
            .get_mut(collection)
            .and_then(Value::as_array_mut)
            .expect("collection array");
        // The path id wins over whatever the body carries.
        row["id"] = rows[idx]["id"].clone();
        rows[idx] = row.clone();
        self.persist(&doc)?;
        Ok(row)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        ensure_known(collection)?;
        let mut doc = self.doc.lock().expect("repo lock");
        let idx = Self::rows(&doc, collection)?
            .iter()
            .position(|r| id_matches(r, id))
            .ok_or_else(|| GcgError::NotFound(format!("{collection}/{id}")))?;
        doc.get_mut(collection)
            .and_then(Value::as_array_mut)
            .expect("collection array")
            .remove(idx);
        self.persist(&doc)?;
        Ok(())
    }
}
