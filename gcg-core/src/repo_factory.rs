use crate::error::Result;
use crate::repo::{DocumentRepo, OpenParams};
use crate::repo_json::JsonDocumentRepo;
use crate::repo_sqlite::SqliteDocumentRepo;

#[derive(Clone, Copy, Debug)]
pub enum Backend {
    Json,
    Sqlite,
}

pub fn open_repo(backend: Backend, p: OpenParams) -> Result<Box<dyn DocumentRepo>> {
    match backend {
        Backend::Json => Ok(Box::new(JsonDocumentRepo::open(&p.db_path)?)),
        Backend::Sqlite => Ok(Box::new(SqliteDocumentRepo::open(&p.db_path)?)),
    }
}
