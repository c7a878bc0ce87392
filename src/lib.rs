//! chat-relay - room-based real-time chat relay.
//!
//! Clients join named rooms over WebSocket, exchange messages, and see each
//! other's typing status. The relay keeps room membership in memory and fans
//! events out to the members of the addressed room only.

pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod web;

pub use config::Config;
pub use error::{RelayError, Result};
pub use relay::{
    ChatMessage, ClientCommand, Connection, ConnectionHandle, ConnectionId, RelayHub,
    RoomRegistry, ServerEvent, TypingNotice, TypingStatus,
};
pub use web::WebServer;
