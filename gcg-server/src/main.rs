#![forbid(unsafe_code)]

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use gcg_core::policy::UploadPolicy;
use gcg_core::repo::OpenParams;
use gcg_core::repo_factory::open_repo;
use gcg_core::uploads::UploadStore;
use gcg_server::{AppState, ServerConfig, build_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gcg_server=info,gcg_core=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let repo = open_repo(
        config.backend,
        OpenParams {
            db_path: config.db_path.clone(),
        },
    )?;
    let uploads = UploadStore::new(&config.upload_dir, UploadPolicy::default());
    let state = AppState::new(Arc::from(repo), Arc::new(uploads));
    let app = build_router(state, &config.cors_origins);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, db = %config.db_path.display(), "GCG document service listening");
    axum::serve(listener, app).await?;
    Ok(())
}
