pub mod collections;
pub mod download;
pub mod health;
pub mod stats;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::json;
use tower_http::cors::CorsLayer;

use gcg_core::error::GcgError;

use crate::auth;
use crate::state::AppState;

// Multipart framing overhead on top of the 10 MiB file ceiling; oversize
// files must reach the policy check so the client sees 400, not 413.
const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Map repository/store failures onto the wire convention: every failure is
/// a JSON `{"error": ...}` body, nothing is fatal.
pub fn error_response(err: &GcgError) -> Response {
    match err {
        GcgError::NotFound(_) => error_body(StatusCode::NOT_FOUND, &err.to_string()),
        GcgError::Validation(_) => error_body(StatusCode::BAD_REQUEST, &err.to_string()),
        _ => {
            tracing::error!(%err, "internal error");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!")
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/upload", post(upload::handle))
        .route("/download/{filename}", get(download::handle))
        .route("/dashboard-data", get(stats::dashboard_data))
        .route("/aspek-data", get(stats::aspek_data))
        .route(
            "/{collection}",
            get(collections::list).post(collections::create),
        )
        .route(
            "/{collection}/{id}",
            get(collections::get_one)
                .put(collections::update)
                .delete(collections::remove),
        )
        .layer(middleware::from_fn(auth::require_bearer));

    Router::new()
        .route("/health", get(health::handle))
        .nest("/api", api)
        .layer(cors_layer(cors_origins))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
