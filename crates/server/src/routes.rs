//! Route configuration.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Creates the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // The framework body limit is disabled here: the upload core
        // enforces the configured cap incrementally and aborts the
        // stream as soon as it is crossed.
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/ws/{client_id}", get(handlers::subscribe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
