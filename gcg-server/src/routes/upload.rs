use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gcg_core::domain::StoredFile;
use gcg_core::error::GcgError;

use crate::events::DataEvent;
use crate::routes::{error_body, error_response};
use crate::state::AppState;

#[derive(Serialize)]
struct UploadResponse {
    success: bool,
    file: StoredFile,
}

/// `POST /api/upload`: multipart form with a `file` part and optional
/// metadata parts (`tahun`). Success mirrors the legacy wire shape:
/// `{"success": true, "file": {...}}`.
pub async fn handle(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut tahun: Option<i32> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "malformed multipart body");
                return error_body(StatusCode::BAD_REQUEST, "Upload failed");
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let original_name = field
                    .file_name()
                    .unwrap_or("unnamed")
                    .to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((original_name, mimetype, bytes.to_vec())),
                    Err(err) => {
                        tracing::warn!(%err, "reading upload body");
                        return error_body(StatusCode::BAD_REQUEST, "Upload failed");
                    }
                }
            }
            "tahun" | "year" => {
                tahun = field
                    .text()
                    .await
                    .ok()
                    .and_then(|t| t.trim().parse::<i32>().ok());
            }
            _ => {}
        }
    }

    let Some((original_name, mimetype, bytes)) = file else {
        return error_body(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    match state.uploads.save(&original_name, &mimetype, &bytes) {
        Ok(stored) => {
            state.events.publish(DataEvent::FileUploaded { tahun });
            Json(UploadResponse {
                success: true,
                file: stored,
            })
            .into_response()
        }
        // Policy rejections (oversize, empty) surface as plain 400s.
        Err(err @ GcgError::Validation(_)) => error_body(StatusCode::BAD_REQUEST, &err.to_string()),
        Err(err) => error_response(&err),
    }
}
