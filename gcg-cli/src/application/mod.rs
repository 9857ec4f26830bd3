pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use gcg_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::List {
            collection,
            tahun,
            db,
            backend,
        } => handlers::handle_list(collection, tahun, db, backend),
        Commands::Stats { year, db, backend } => handlers::handle_stats(year, db, backend),
        Commands::AddChecklist {
            tahun,
            deskripsi,
            aspek,
            db,
            backend,
        } => handlers::handle_add_checklist(tahun, deskripsi, aspek, db, backend),
        Commands::Rm {
            collection,
            id,
            db,
            backend,
        } => handlers::handle_rm(collection, id, db, backend),
        Commands::Import { json, db } => handlers::handle_import(json, db),
        Commands::ScanUploads { dir } => handlers::handle_scan_uploads(dir),
    }
}
