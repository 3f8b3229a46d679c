//! Route configuration.

use crate::api::handlers;
use crate::api::middleware::require_api_key;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;

/// Creates the API router.
///
/// The chart endpoints sit behind the API key check; the health endpoints
/// are open.
pub fn create_router(state: Arc<AppState>) -> Router {
    let charts = Router::new()
        .route("/birth-chart", post(handlers::birth_chart))
        .route("/transits", post(handlers::transits))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_api_key,
        ));

    Router::new()
        // Health check
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Charts
        .merge(charts)
        .with_state(state)
}
