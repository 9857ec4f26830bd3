//! json-server style CRUD over the named collections. Query parameters act
//! as exact-match filters, e.g. `/api/checklists?tahun=2024&aspek=...`.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::events::DataEvent;
use crate::routes::error_response;
use crate::state::AppState;

fn to_filters(params: HashMap<String, String>) -> Vec<(String, String)> {
    params.into_iter().collect()
}

fn year_of(row: &Value) -> Option<i32> {
    row.get("tahun")
        .and_then(Value::as_i64)
        .and_then(|y| i32::try_from(y).ok())
}

/// Data-change fan-out for the two collections the dashboards watch.
fn publish_change(state: &AppState, collection: &str, row: &Value) {
    let tahun = year_of(row);
    match collection {
        "checklists" => state.events.publish(DataEvent::ChecklistUpdated { tahun }),
        "userDocuments" => state.events.publish(DataEvent::DocumentsUpdated { tahun }),
        _ => {}
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match state.repo.list(&collection, &to_filters(params)) {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn get_one(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    match state.repo.get(&collection, &id) {
        Ok(row) => Json(row).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    // Upload records carry string ids, minted here rather than counted.
    if collection == "userDocuments"
        && body.is_object()
        && body.get("id").is_none_or(Value::is_null)
    {
        body["id"] = Value::String(uuid::Uuid::new_v4().to_string());
    }
    match state.repo.insert(&collection, body) {
        Ok(row) => {
            publish_change(&state, &collection, &row);
            (StatusCode::CREATED, Json(row)).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    match state.repo.update(&collection, &id, body) {
        Ok(row) => {
            publish_change(&state, &collection, &row);
            Json(row).into_response()
        }
        Err(err) => error_response(&err),
    }
}

pub async fn remove(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    // Grab the row first so the change event can carry its year.
    let removed = state.repo.get(&collection, &id).ok();
    match state.repo.delete(&collection, &id) {
        Ok(()) => {
            if let Some(row) = removed {
                publish_change(&state, &collection, &row);
            }
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => error_response(&err),
    }
}
