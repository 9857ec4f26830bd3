use std::env;
use std::path::PathBuf;

use gcg_core::repo_factory::Backend;

fn env_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_list(name: &str, default: &[&str]) -> Vec<String> {
    match env::var(name) {
        Ok(v) => v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Err(_) => default.iter().map(|s| s.to_string()).collect(),
    }
}

pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub backend: Backend,
    pub upload_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let backend = match env_str("GCG_BACKEND", "json").to_ascii_lowercase().as_str() {
            "sqlite" => Backend::Sqlite,
            _ => Backend::Json,
        };
        Self {
            port: env_u16("PORT", 3001),
            db_path: PathBuf::from(env_str("GCG_DB", "db.json")),
            backend,
            upload_dir: PathBuf::from(env_str("GCG_UPLOAD_DIR", "uploads")),
            cors_origins: env_list(
                "GCG_CORS_ORIGINS",
                &["http://localhost:5173", "http://localhost:3000"],
            ),
        }
    }
}
