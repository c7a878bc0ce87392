//! WebSocket transport for the relay.

pub mod chat;
pub mod messages;

pub use chat::chat_ws_handler;
pub use messages::{decode_frame, encode_event};
