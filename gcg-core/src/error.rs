use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcgError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, GcgError>;
