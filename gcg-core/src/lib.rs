#![forbid(unsafe_code)]

pub mod error;
pub mod policy;

pub mod domain;
pub mod nav;
pub mod stats;

pub mod repo;
pub mod repo_factory;
pub mod repo_json;
pub mod repo_sqlite;

pub mod uploads;

// Re-exports: stable API surface
pub use domain::{ChecklistItem, ChecklistStatus, StoredFile, UploadedFile};
pub use repo::{DocumentRepo, OpenParams};
pub use repo_factory::{Backend, open_repo};
pub use stats::{AspectStat, OverallStats, SENTINEL_ASPEK, aspect_stats, overall_stats};
pub use uploads::UploadStore;
