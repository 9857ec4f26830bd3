//! Bearer-token gate for `/api`. Any non-empty token passes; this mirrors
//! the legacy stub and is a placeholder, not a security boundary.

use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::routes::error_body;

pub async fn require_bearer(req: Request, next: Next) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return error_body(StatusCode::UNAUTHORIZED, "No authorization header");
    };
    let raw = value.to_str().unwrap_or("");
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return error_body(StatusCode::UNAUTHORIZED, "Invalid token");
    }
    next.run(req).await
}
