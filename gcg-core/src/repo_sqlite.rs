//! SQLite backend: same collection semantics as the flat file, but each row
//! lives in a `records` table keyed by (collection, id). Rows keep their JSON
//! body verbatim, so the two backends stay interchangeable behind the trait.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::{Value, json};

use crate::error::{GcgError, Result};
use crate::repo::{COLLECTIONS, DocumentRepo, ensure_known, ensure_object, row_matches};

pub struct SqliteDocumentRepo {
    conn: Mutex<Connection>,
}

fn id_text(id: &Value) -> Result<String> {
    match id {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(GcgError::Format(format!("unsupported id value: {other}"))),
    }
}

impl SqliteDocumentRepo {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL,
                body       TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Import a legacy flat `db.json` document wholesale, keeping row ids.
    pub fn seed_from_json(&self, path: &Path) -> Result<usize> {
        let bytes = std::fs::read(path)?;
        let doc: Value = serde_json::from_slice(&bytes)?;
        let mut imported = 0usize;
        for &collection in COLLECTIONS {
            let Some(raw) = doc.get(collection) else {
                continue;
            };
            let rows = crate::stats::decode_collection::<Value>(collection, raw)
                .map_err(|e| GcgError::Format(e.to_string()))?;
            for row in rows {
                if !row.is_object() {
                    tracing::warn!(collection, "skipping non-object row in legacy import");
                    continue;
                }
                self.insert(collection, row)?;
                imported += 1;
            }
        }
        Ok(imported)
    }

    fn collection_rows(&self, collection: &str) -> Result<Vec<Value>> {
        let conn = self.conn.lock().expect("repo lock");
        let mut stmt =
            conn.prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY rowid")?;
        let rows = stmt
            .query_map(params![collection], |r| r.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|body| serde_json::from_str(&body).map_err(GcgError::from))
            .collect()
    }

    fn next_numeric_id(&self, collection: &str) -> Result<i64> {
        let conn = self.conn.lock().expect("repo lock");
        let max: Option<i64> = conn.query_row(
            "SELECT MAX(CAST(id AS INTEGER)) FROM records
             WHERE collection = ?1 AND id GLOB '[0-9]*'",
            params![collection],
            |r| r.get(0),
        )?;
        Ok(max.unwrap_or(0) + 1)
    }
}

impl DocumentRepo for SqliteDocumentRepo {
    fn list(&self, collection: &str, filters: &[(String, String)]) -> Result<Vec<Value>> {
        ensure_known(collection)?;
        Ok(self
            .collection_rows(collection)?
            .into_iter()
            .filter(|r| row_matches(r, filters))
            .collect())
    }

    fn get(&self, collection: &str, id: &str) -> Result<Value> {
        ensure_known(collection)?;
        let conn = self.conn.lock().expect("repo lock");
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM records WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |r| r.get(0),
            )
            .optional()?;
        match body {
            Some(b) => Ok(serde_json::from_str(&b)?),
            None => Err(GcgError::NotFound(format!("{collection}/{id}"))),
        }
    }

    fn insert(&self, collection: &str, mut row: Value) -> Result<Value> {
        ensure_known(collection)?;
        ensure_object(&row)?;
        if row.get("id").is_none_or(Value::is_null) {
            row["id"] = json!(self.next_numeric_id(collection)?);
        }
        let id = id_text(&row["id"])?;
        let body = serde_json::to_string(&row)?;
        let conn = self.conn.lock().expect("repo lock");
        conn.execute(
            "INSERT INTO records (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, id, body],
        )?;
        Ok(row)
    }

    fn update(&self, collection: &str, id: &str, mut row: Value) -> Result<Value> {
        ensure_known(collection)?;
        ensure_object(&row)?;
        // Keep the addressed id authoritative over the body's.
        let existing = self.get(collection, id)?;
        row["id"] = existing["id"].clone();
        let body = serde_json::to_string(&row)?;
        let conn = self.conn.lock().expect("repo lock");
        let n = conn.execute(
            "UPDATE records SET body = ?3 WHERE collection = ?1 AND id = ?2",
            params![collection, id, body],
        )?;
        if n == 0 {
            return Err(GcgError::NotFound(format!("{collection}/{id}")));
        }
        Ok(row)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        ensure_known(collection)?;
        let conn = self.conn.lock().expect("repo lock");
        let n = conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        if n == 0 {
            return Err(GcgError::NotFound(format!("{collection}/{id}")));
        }
        Ok(())
    }
}
