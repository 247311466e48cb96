//! HTTP handlers.
//!
//! - `/metrics` : text exposition of the registry (path configurable)
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining)

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use nodegauge_core::exposition::CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

/// Scrape handler. Request content is ignored; rendering cannot fail.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().render();
    tracing::trace!(bytes = body.len(), "scrape served");

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
