pub mod config;
pub mod modules;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use modules::metrics::metrics_routes;
use services::metrics::MetricsRegistry;

/// Observability router served next to the poll loop.
pub fn create_app(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(metrics_routes(metrics))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Homework status notifier"
}
