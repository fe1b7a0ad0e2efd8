//! HTTP surface for the saga orchestration core.
//!
//! Exposes order placement, ledger lookups and participant notification
//! intake, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use common::SharedClock;
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use saga::{EventService, OrderService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventStore> {
    pub orders: OrderService<S>,
    pub events: EventService<S>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EventStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/order", post(routes::orders::create::<S>))
        .route("/api/event", get(routes::events::find::<S>))
        .route("/api/event/all", get(routes::events::list_all::<S>))
        .route("/api/event/notify", post(routes::events::notify::<S>))
        .route(
            "/api/event/{transaction_id}/progress",
            get(routes::events::progress::<S>),
        )
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

/// Creates the application state over one ledger.
pub fn create_default_state<S: EventStore + Clone + 'static>(
    event_store: S,
    clock: SharedClock,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        orders: OrderService::new(event_store.clone(), clock.clone()),
        events: EventService::new(event_store, clock),
    })
}
