use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "GCG document service admin CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print rows of one collection, optionally filtered by year
    List {
        collection: String,
        #[arg(long)]
        tahun: Option<i32>,
        /// Path to the datastore (db.json or a SQLite file)
        #[arg(long, default_value = "db.json")]
        db: PathBuf,
        /// Storage backend: "json" or "sqlite"
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Overall and per-aspect completion statistics for one year
    Stats {
        year: i32,
        #[arg(long, default_value = "db.json")]
        db: PathBuf,
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Insert a checklist row
    AddChecklist {
        #[arg(long)]
        tahun: i32,
        #[arg(long)]
        deskripsi: String,
        #[arg(long)]
        aspek: Option<String>,
        #[arg(long, default_value = "db.json")]
        db: PathBuf,
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Delete one row by id
    Rm {
        collection: String,
        id: String,
        #[arg(long, default_value = "db.json")]
        db: PathBuf,
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Seed a SQLite datastore from a legacy flat db.json
    Import {
        /// Legacy db.json to read
        json: PathBuf,
        /// SQLite file to create or extend
        #[arg(long, default_value = "gcg.sqlite")]
        db: PathBuf,
    },

    /// List the files sitting in the upload directory
    ScanUploads {
        #[arg(long, default_value = "uploads")]
        dir: PathBuf,
    },
}
