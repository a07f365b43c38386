use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, provider};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Host contract
        .route("/provider/settings", get(provider::settings))
        .route("/provider/search", post(provider::search))
        .route("/provider/smart-search", post(provider::smart_search))
        .route("/provider/latest", get(provider::latest))
        .route("/provider/info-hash", post(provider::info_hash))
        .route("/provider/magnet-link", post(provider::magnet_link))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
