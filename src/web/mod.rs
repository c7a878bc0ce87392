//! Web transport for the relay.
//!
//! This module provides the WebSocket endpoint clients connect to, plus
//! status and health routes.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod ws;

pub use router::create_router;
pub use server::WebServer;
