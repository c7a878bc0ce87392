//! Relay module.
//!
//! This module provides the room-scoped publish/subscribe core:
//! - Connections with bounded outbound queues
//! - A room registry enforcing single-room membership
//! - The hub that relays chat messages and typing status

mod connection;
mod event;
mod hub;
mod registry;

pub use connection::{Connection, ConnectionHandle, ConnectionId, Delivery};
pub use event::{ChatMessage, ClientCommand, ServerEvent, TypingNotice, TypingStatus};
pub use hub::{RelayHub, DEFAULT_QUEUE_CAPACITY};
pub use registry::{FanoutReport, JoinResult, RoomInfo, RoomRegistry};
