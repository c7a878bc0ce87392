//! Commands accepted from clients and events fanned out to them.
//!
//! Both directions share one envelope, `{"event": <name>, "data": <payload>}`,
//! with camelCase payload fields.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A chat message addressed to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message ID, generated by the sender.
    pub id: String,
    /// Sender's user ID.
    pub user_id: String,
    /// Sender's display name.
    pub username: String,
    /// Message body.
    pub message: String,
    /// Target room.
    pub room_id: String,
    /// ISO 8601 timestamp. Filled in by the relay when the sender omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    /// Create a message without a timestamp.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        username: impl Into<String>,
        message: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            username: username.into(),
            message: message.into(),
            room_id: room_id.into(),
            timestamp: None,
        }
    }

    /// Set an explicit timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Stamp the message with the current time unless it already carries one.
    ///
    /// An empty timestamp counts as missing.
    pub fn stamped(mut self) -> Self {
        if self.timestamp.as_deref().map_or(true, str::is_empty) {
            self.timestamp = Some(now_iso8601());
        }
        self
    }
}

/// Typing status reported by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStatus {
    /// User ID of the typist.
    pub user_id: String,
    /// Whether the user is currently typing.
    pub typing: bool,
    /// Target room.
    pub room_id: String,
}

impl TypingStatus {
    /// Create a typing status.
    pub fn new(user_id: impl Into<String>, typing: bool, room_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            typing,
            room_id: room_id.into(),
        }
    }

    /// The room-less form delivered to other members.
    pub fn notice(&self) -> TypingNotice {
        TypingNotice {
            user_id: self.user_id.clone(),
            typing: self.typing,
        }
    }
}

/// Typing status as delivered to the other members of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingNotice {
    /// User ID of the typist.
    pub user_id: String,
    /// Whether the user is currently typing.
    pub typing: bool,
}

/// Commands sent from client to relay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Join a room, leaving the current one.
    JoinRoom(String),
    /// Send a chat message to a room.
    Message(ChatMessage),
    /// Report typing status to a room.
    Typing(TypingStatus),
}

/// Events sent from relay to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A chat message, always timestamped.
    Message(ChatMessage),
    /// Another member's typing status.
    Typing(TypingNotice),
}

impl ServerEvent {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Message(_) => "message",
            ServerEvent::Typing(_) => "typing",
        }
    }
}

/// Current UTC time in the `2024-01-01T00:00:00.000Z` form.
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
