//! HTTP query endpoint for forklift checklist summaries.
//!
//! Serves the most-recent-first summary of the backing table as JSON,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod demo;
pub mod error;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use sheet_store::SheetSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use service::ChecklistService;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SheetSource> {
    pub service: ChecklistService<S>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SheetSource + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/", get(routes::checklist::query::<S>))
        .route("/checklist", get(routes::checklist::query::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state for `source` using the given configuration.
pub fn create_state<S: SheetSource + 'static>(source: S, config: &Config) -> Arc<AppState<S>> {
    let service = ChecklistService::new(source, config.sheet_name.clone(), config.summary.clone());
    Arc::new(AppState { service })
}
