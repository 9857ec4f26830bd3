//! Dashboard aggregates. A missing or unparsable `year` is not an error;
//! the client just gets the zeroed/empty shape to render.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};

use gcg_core::stats::report_for_year;

use crate::routes::error_response;
use crate::state::AppState;

fn year_param(params: &HashMap<String, String>) -> Option<i32> {
    params.get("year").and_then(|y| y.trim().parse::<i32>().ok())
}

/// `GET /api/dashboard-data?year=YYYY` — overall completion for the year.
pub async fn dashboard_data(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match report_for_year(state.repo.as_ref(), year_param(&params)) {
        Ok(report) => Json(report.overall).into_response(),
        Err(err) => error_response(&err),
    }
}

/// `GET /api/aspek-data?year=YYYY` — per-aspect completion, best first.
pub async fn aspek_data(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match report_for_year(state.repo.as_ref(), year_param(&params)) {
        Ok(report) => Json(report.aspects).into_response(),
        Err(err) => error_response(&err),
    }
}
