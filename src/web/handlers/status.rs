//! Relay status handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::relay::RelayHub;

/// Body of `GET /api/socket`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Always `true` while the relay is serving.
    pub success: bool,
    /// Human-readable status.
    pub message: String,
    /// Number of non-empty rooms.
    pub rooms: usize,
    /// Number of connections currently in a room.
    pub connections: usize,
}

/// Relay status.
///
/// GET /api/socket
pub async fn relay_status(State(hub): State<Arc<RelayHub>>) -> Json<StatusResponse> {
    let registry = hub.registry();
    Json(StatusResponse {
        success: true,
        message: "relay running".to_string(),
        rooms: registry.room_count().await,
        connections: registry.connection_count().await,
    })
}

/// Health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}
