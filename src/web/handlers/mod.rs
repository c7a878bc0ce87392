//! HTTP handlers alongside the WebSocket endpoint.

pub mod status;

pub use status::{health_check, relay_status, StatusResponse};
