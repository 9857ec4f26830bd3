//! Disk storage for uploaded supporting documents. Files land in one flat
//! directory under a generated unique name; the original name survives only
//! in the returned metadata and in the `userDocuments` records.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::StoredFile;
use crate::error::{GcgError, Result};
use crate::policy::UploadPolicy;

pub struct UploadStore {
    dir: PathBuf,
    policy: UploadPolicy,
}

fn now_rfc3339() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| GcgError::Format(format!("timestamp: {e}")))
}

fn random_suffix() -> Result<u32> {
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf)
        .map_err(|e| GcgError::Format(format!("random suffix: {e}")))?;
    Ok(u32::from_le_bytes(buf))
}

/// Stored names are single path components; anything that could walk out of
/// the upload directory is rejected before touching the filesystem.
fn check_filename(name: &str) -> Result<()> {
    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0')
    {
        return Err(GcgError::Validation(format!("invalid filename '{name}'")));
    }
    Ok(())
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, policy: UploadPolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one upload. Empty and oversize payloads fail validation; the
    /// stored name is `file-<epoch millis>-<random><ext>`.
    pub fn save(&self, original_name: &str, mimetype: &str, bytes: &[u8]) -> Result<StoredFile> {
        if bytes.is_empty() {
            return Err(GcgError::Validation("empty upload".into()));
        }
        if let Some(max) = self.policy.max_file_bytes {
            if bytes.len() as u64 > max {
                return Err(GcgError::Validation(format!(
                    "file exceeds {max} byte limit"
                )));
            }
        }
        std::fs::create_dir_all(&self.dir)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let filename = format!("file-{millis}-{}{ext}", random_suffix()?);
        let path = self.dir.join(&filename);
        std::fs::write(&path, bytes)?;

        Ok(StoredFile {
            original_name: original_name.to_string(),
            filename,
            size: bytes.len() as u64,
            mimetype: mimetype.to_string(),
            path: path.to_string_lossy().into_owned(),
            upload_date: now_rfc3339()?,
        })
    }

    /// Read one stored file back; name must be a bare filename.
    pub fn open(&self, filename: &str) -> Result<Vec<u8>> {
        check_filename(filename)?;
        let path = self.dir.join(filename);
        if !path.is_file() {
            return Err(GcgError::NotFound(format!("file '{filename}'")));
        }
        Ok(std::fs::read(path)?)
    }

    /// List everything on disk, for reconciliation against `userDocuments`.
    pub fn scan(&self) -> Result<Vec<StoredFile>> {
        let mut out = Vec::new();
        if !self.dir.is_dir() {
            return Ok(out);
        }
        for entry in walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let md = entry.metadata().map_err(|e| {
                GcgError::Format(format!("metadata for {:?}: {e}", entry.path()))
            })?;
            let modified = md
                .modified()
                .map(OffsetDateTime::from)
                .ok()
                .and_then(|t| t.format(&Rfc3339).ok())
                .unwrap_or_default();
            let name = entry.file_name().to_string_lossy().into_owned();
            out.push(StoredFile {
                original_name: name.clone(),
                filename: name,
                size: md.len(),
                mimetype: "application/octet-stream".to_string(),
                path: entry.path().to_string_lossy().into_owned(),
                upload_date: modified,
            });
        }
        Ok(out)
    }
}
