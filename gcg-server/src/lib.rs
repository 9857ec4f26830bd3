#![forbid(unsafe_code)]

pub mod auth;
pub mod config;
pub mod events;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use events::{DataEvent, EventBus};
pub use routes::build_router;
pub use state::AppState;
