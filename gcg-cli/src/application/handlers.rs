use std::path::PathBuf;

use serde_json::json;

use gcg_core::error::{GcgError, Result};
use gcg_core::policy::UploadPolicy;
use gcg_core::repo::{DocumentRepo, OpenParams};
use gcg_core::repo_factory::{Backend, open_repo};
use gcg_core::repo_sqlite::SqliteDocumentRepo;
use gcg_core::stats::report_for_year;
use gcg_core::uploads::UploadStore;

fn repo_from_args(db: PathBuf, backend: String) -> Result<Box<dyn DocumentRepo>> {
    let backend = match backend.to_ascii_lowercase().as_str() {
        "json" => Backend::Json,
        "sqlite" => Backend::Sqlite,
        other => {
            return Err(GcgError::Validation(format!(
                "unknown backend '{other}', expected json or sqlite"
            )));
        }
    };
    open_repo(backend, OpenParams { db_path: db })
}

pub fn handle_list(
    collection: String,
    tahun: Option<i32>,
    db: PathBuf,
    backend: String,
) -> Result<()> {
    let repo = repo_from_args(db, backend)?;
    let filters: Vec<(String, String)> = tahun
        .map(|y| vec![("tahun".to_string(), y.to_string())])
        .unwrap_or_default();
    for row in repo.list(&collection, &filters)? {
        println!("{row}");
    }
    Ok(())
}

pub fn handle_stats(year: i32, db: PathBuf, backend: String) -> Result<()> {
    let repo = repo_from_args(db, backend)?;
    let report = report_for_year(repo.as_ref(), Some(year))?;

    let o = &report.overall;
    println!("tahun {year}");
    println!(
        "  keseluruhan: {}/{} terunggah ({}%), {} tertunda, {} bytes",
        o.uploaded_count, o.total_checklist, o.progress, o.pending_count, o.total_size
    );
    for a in &report.aspects {
        println!(
            "  {:<40} {}/{} ({}%)",
            a.aspek, a.uploaded_count, a.total_items, a.progress
        );
    }
    Ok(())
}

pub fn handle_add_checklist(
    tahun: i32,
    deskripsi: String,
    aspek: Option<String>,
    db: PathBuf,
    backend: String,
) -> Result<()> {
    let repo = repo_from_args(db, backend)?;
    let row = repo.insert(
        "checklists",
        json!({
            "aspek": aspek,
            "deskripsi": deskripsi,
            "tahun": tahun,
            "status": "pending",
        }),
    )?;
    println!("inserted checklist id={}", row["id"]);
    Ok(())
}

pub fn handle_rm(collection: String, id: String, db: PathBuf, backend: String) -> Result<()> {
    let repo = repo_from_args(db, backend)?;
    repo.delete(&collection, &id)?;
    println!("deleted {collection}/{id}");
    Ok(())
}

pub fn handle_import(json: PathBuf, db: PathBuf) -> Result<()> {
    let repo = SqliteDocumentRepo::open(&db)?;
    let n = repo.seed_from_json(&json)?;
    println!("imported {n} rows into {}", db.display());
    Ok(())
}

pub fn handle_scan_uploads(dir: PathBuf) -> Result<()> {
    let store = UploadStore::new(dir, UploadPolicy::default());
    for f in store.scan()? {
        println!("{}  {} bytes  modified={}", f.filename, f.size, f.upload_date);
    }
    Ok(())
}
