//! Route configuration and setup.

mod health;

use crate::api_doc::ApiDoc;
use crate::handlers::{root::root, video::stream_video};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use videogate_core::Config;
use videogate_infra::request_id_middleware;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    build_router(state, config.http_concurrency_limit)
}

/// Router with the full middleware stack, independent of configuration loading.
pub fn build_router(state: Arc<AppState>, concurrency_limit: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/video", get(stream_video))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .with_state(state)
        .merge(RapiDoc::with_openapi("/api/openapi.json", ApiDoc::openapi()).path("/docs"))
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
