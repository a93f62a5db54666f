//! Route configuration and setup

use crate::error::HttpAppError;
use crate::handlers::{download, health, upload};
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use s3bridge_core::AppError;
use s3bridge_infra::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router with every route and middleware layer.
///
/// Uploads are buffered whole and have no size limit.
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &Request| make_request_span(request));

    Router::new()
        .route(
            "/upload",
            post(upload::upload_file).fallback(upload::method_not_allowed),
        )
        .route("/downloadToFile", get(download::download_to_file))
        .route("/health", get(health::health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(trace_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn not_found() -> HttpAppError {
    AppError::NotFound("404 page not found".to_string()).into()
}
