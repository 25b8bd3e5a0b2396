//! Route definitions for the DocPdf HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to the handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes, the upload limit and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload =
        usize::try_from(state.config.staging.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .route("/convert", post(handlers::convert::convert))
        .route("/download/{reference}", get(handlers::download::download))
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}
