//! WebSocket frame encoding for relay commands and events.

use crate::relay::{ClientCommand, ServerEvent};
use crate::Result;

/// Decode a text frame into a client command.
///
/// Fails on non-JSON input, unknown event names, and payloads with missing
/// or mistyped fields.
pub fn decode_frame(text: &str) -> Result<ClientCommand> {
    Ok(serde_json::from_str(text)?)
}

/// Encode an outbound event as a text frame.
pub fn encode_event(event: &ServerEvent) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{ChatMessage, TypingStatus};
    use crate::RelayError;
    use serde_json::{json, Value};

    #[test]
    fn test_decode_join_room() {
        let cmd = decode_frame(r#"{"event": "join_room", "data": "general"}"#).unwrap();
        assert_eq!(cmd, ClientCommand::JoinRoom("general".to_string()));
    }

    #[test]
    fn test_decode_message_without_timestamp() {
        let json = r#"{
            "event": "message",
            "data": {"id": "m1", "userId": "u1", "username": "Alex", "message": "hi", "roomId": "general"}
        }"#;
        match decode_frame(json).unwrap() {
            ClientCommand::Message(msg) => {
                assert_eq!(msg.id, "m1");
                assert_eq!(msg.user_id, "u1");
                assert_eq!(msg.username, "Alex");
                assert_eq!(msg.message, "hi");
                assert_eq!(msg.room_id, "general");
                assert!(msg.timestamp.is_none());
            }
            other => panic!("Expected Message command, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_message_with_timestamp() {
        let json = r#"{
            "event": "message",
            "data": {"id": "m1", "userId": "u1", "username": "Alex", "message": "hi",
                     "roomId": "general", "timestamp": "2024-01-01T00:00:00.000Z"}
        }"#;
        match decode_frame(json).unwrap() {
            ClientCommand::Message(msg) => {
                assert_eq!(msg.timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
            }
            other => panic!("Expected Message command, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_typing() {
        let json = r#"{"event": "typing", "data": {"userId": "u1", "typing": true, "roomId": "general"}}"#;
        assert_eq!(
            decode_frame(json).unwrap(),
            ClientCommand::Typing(TypingStatus::new("u1", true, "general"))
        );
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let json = r#"{"event": "typing", "data": {"userId": "u1", "typing": false, "roomId": "r", "extra": 1}}"#;
        assert!(decode_frame(json).is_ok());
    }

    #[test]
    fn test_decode_malformed_frames() {
        let frames = [
            "not json",
            r#"{"event": "leave_room", "data": "general"}"#,
            r#"{"event": "join_room", "data": 42}"#,
            r#"{"event": "join_room"}"#,
            r#"{"event": "message", "data": {"id": "m1", "userId": "u1", "message": "hi"}}"#,
            r#"{"event": "typing", "data": {"userId": "u1", "typing": "yes", "roomId": "r"}}"#,
            r#"{"data": "general"}"#,
        ];
        for frame in frames {
            let result = decode_frame(frame);
            assert!(
                matches!(result, Err(RelayError::Decode(_))),
                "frame should be rejected: {frame}"
            );
        }
    }

    #[test]
    fn test_encode_message() {
        let msg = ChatMessage::new("m1", "u1", "Alex", "hi", "general")
            .with_timestamp("2024-01-01T00:00:00.000Z");
        let text = encode_event(&ServerEvent::Message(msg)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "event": "message",
                "data": {
                    "id": "m1",
                    "userId": "u1",
                    "username": "Alex",
                    "message": "hi",
                    "roomId": "general",
                    "timestamp": "2024-01-01T00:00:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_encode_typing() {
        let notice = TypingStatus::new("u1", true, "general").notice();
        let text = encode_event(&ServerEvent::Typing(notice)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({"event": "typing", "data": {"userId": "u1", "typing": true}})
        );
    }
}
