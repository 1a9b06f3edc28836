//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Option chain
        .route("/nifty/refresh/{sort_by}", get(handlers::refresh))
        .route("/nifty/refresh/{sort_by}/{order_by}", get(handlers::refresh))
        .route(
            "/nifty/refreshAnalysis/{sort_by}",
            get(handlers::refresh_analysis),
        )
        .route(
            "/nifty/refreshAnalysis/{sort_by}/{order_by}",
            get(handlers::refresh_analysis),
        )
        // Indexes
        .route("/nifty/refreshIndexes", get(handlers::refresh_indexes))
        .with_state(state)
}
