//! Router configuration for the relay.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::relay::RelayHub;

use super::handlers::{health_check, relay_status};
use super::middleware::create_cors_layer;
use super::ws::chat_ws_handler;

/// Create the relay router: the WebSocket endpoint plus the status route.
pub fn create_router(hub: Arc<RelayHub>, config: &ServerConfig) -> Router {
    Router::new()
        .route(&config.ws_path, get(chat_ws_handler))
        .route("/api/socket", get(relay_status))
        .with_state(hub)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins)),
        )
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}
