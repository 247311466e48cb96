//! Axum router wiring.
//!
//! Routes only accept `GET` (and the derived `HEAD`); any other method on a
//! known path gets `405 Method Not Allowed` from axum.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().exporter.metrics_path.clone();
    Router::new()
        .route(&metrics_path, get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .with_state(state)
}
