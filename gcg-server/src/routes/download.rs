use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use gcg_core::error::GcgError;

use crate::routes::error_body;
use crate::state::AppState;

/// `GET /api/download/{filename}`: the stored bytes as an attachment.
pub async fn handle(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    match state.uploads.open(&filename) {
        Ok(bytes) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            );
            let disposition = format!("attachment; filename=\"{filename}\"");
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                headers.insert(header::CONTENT_DISPOSITION, value);
            }
            (headers, bytes).into_response()
        }
        Err(GcgError::NotFound(_)) => error_body(StatusCode::NOT_FOUND, "File not found"),
        Err(GcgError::Validation(_)) => error_body(StatusCode::BAD_REQUEST, "Invalid filename"),
        Err(err) => {
            tracing::error!(%err, "download failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!")
        }
    }
}
