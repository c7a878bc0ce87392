//! The relay hub: routes client commands to the room registry and fans
//! events out to room members.

use std::sync::Arc;

use super::connection::{Connection, ConnectionHandle, ConnectionId};
use super::event::{ChatMessage, ClientCommand, ServerEvent, TypingStatus};
use super::registry::{FanoutReport, JoinResult, RoomRegistry};

/// Default capacity of each connection's outbound queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Room-scoped publish/subscribe relay.
///
/// Shared across all connections for the lifetime of the process.
pub struct RelayHub {
    registry: RoomRegistry,
    queue_capacity: usize,
}

impl RelayHub {
    /// Create a hub whose connections get queues of `queue_capacity` events.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            registry: RoomRegistry::new(),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Get the room registry.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Accept a new connection. It starts out in no room.
    pub fn connect(&self) -> Connection {
        let connection = Connection::new(self.queue_capacity);
        tracing::info!(connection_id = %connection.id(), "connection opened");
        connection
    }

    /// Move a connection into `room_id`. No event is broadcast.
    pub async fn join_room(&self, connection: &ConnectionHandle, room_id: &str) -> JoinResult {
        let result = self.registry.join(connection, room_id).await;
        match &result {
            JoinResult::Switched { from } => tracing::info!(
                connection_id = %connection.id(),
                from = %from,
                room_id,
                "connection switched rooms"
            ),
            JoinResult::Joined | JoinResult::AlreadyJoined => tracing::info!(
                connection_id = %connection.id(),
                room_id,
                "connection joined room"
            ),
        }
        result
    }

    /// Relay a chat message to every member of its room, sender included.
    ///
    /// The sender does not have to be a member of the target room.
    pub async fn message(&self, sender: &ConnectionHandle, message: ChatMessage) -> FanoutReport {
        let message = message.stamped();
        let room_id = message.room_id.clone();
        let report = self
            .registry
            .deliver(&room_id, Arc::new(ServerEvent::Message(message)), None)
            .await;

        tracing::debug!(
            connection_id = %sender.id(),
            room_id = %room_id,
            delivered = report.delivered,
            "message relayed"
        );
        report
    }

    /// Relay a typing status to every member of its room except the sender.
    pub async fn typing(&self, sender: &ConnectionHandle, status: TypingStatus) -> FanoutReport {
        let event = Arc::new(ServerEvent::Typing(status.notice()));
        let report = self
            .registry
            .deliver(&status.room_id, event, Some(sender.id()))
            .await;

        tracing::trace!(
            connection_id = %sender.id(),
            room_id = %status.room_id,
            typing = status.typing,
            delivered = report.delivered,
            "typing relayed"
        );
        report
    }

    /// Dispatch a decoded client command.
    pub async fn handle(&self, connection: &ConnectionHandle, command: ClientCommand) {
        match command {
            ClientCommand::JoinRoom(room_id) => {
                self.join_room(connection, &room_id).await;
            }
            ClientCommand::Message(message) => {
                self.message(connection, message).await;
            }
            ClientCommand::Typing(status) => {
                self.typing(connection, status).await;
            }
        }
    }

    /// Forget a connection. No event is broadcast.
    pub async fn disconnect(&self, id: ConnectionId) {
        let room = self.registry.remove(id).await;
        tracing::info!(
            connection_id = %id,
            room_id = room.as_deref().unwrap_or("-"),
            "connection closed"
        );
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recv_message(conn: &mut Connection) -> Option<ChatMessage> {
        match conn.try_recv().as_deref() {
            Some(ServerEvent::Message(msg)) => Some(msg.clone()),
            Some(other) => panic!("expected message, got {other:?}"),
            None => None,
        }
    }

    #[tokio::test]
    async fn test_new_clamps_zero_capacity() {
        let hub = RelayHub::new(0);
        let mut conn = hub.connect();
        hub.join_room(conn.handle(), "general").await;

        let report = hub
            .message(conn.handle(), ChatMessage::new("m1", "u1", "Alex", "hi", "general"))
            .await;
        assert_eq!(report.delivered, 1);
        assert!(recv_message(&mut conn).is_some());
    }

    #[tokio::test]
    async fn test_message_includes_sender() {
        let hub = RelayHub::default();
        let mut a = hub.connect();
        hub.join_room(a.handle(), "general").await;

        hub.message(a.handle(), ChatMessage::new("m1", "u1", "Alex", "hi", "general"))
            .await;

        let msg = recv_message(&mut a).expect("sender should receive its own message");
        assert_eq!(msg.id, "m1");
        assert!(msg.timestamp.is_some());
    }

    #[tokio::test]
    async fn test_message_from_non_member() {
        let hub = RelayHub::default();
        let mut a = hub.connect();
        let d = hub.connect();
        hub.join_room(a.handle(), "general").await;

        let report = hub
            .message(d.handle(), ChatMessage::new("m1", "u4", "Dana", "hello", "general"))
            .await;

        assert_eq!(report.delivered, 1);
        assert!(recv_message(&mut a).is_some());
    }

    #[tokio::test]
    async fn test_typing_excludes_sender() {
        let hub = RelayHub::default();
        let mut a = hub.connect();
        let mut b = hub.connect();
        hub.join_room(a.handle(), "general").await;
        hub.join_room(b.handle(), "general").await;

        let report = hub
            .typing(a.handle(), TypingStatus::new("u1", true, "general"))
            .await;

        assert_eq!(report.delivered, 1);
        assert!(a.try_recv().is_none());
        match b.try_recv().as_deref() {
            Some(ServerEvent::Typing(notice)) => {
                assert_eq!(notice.user_id, "u1");
                assert!(notice.typing);
            }
            other => panic!("expected typing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_dispatches_commands() {
        let hub = RelayHub::default();
        let mut a = hub.connect();

        hub.handle(a.handle(), ClientCommand::JoinRoom("general".to_string()))
            .await;
        assert!(hub.registry().is_member(a.id(), "general").await);

        hub.handle(
            a.handle(),
            ClientCommand::Message(ChatMessage::new("m1", "u1", "Alex", "hi", "general")),
        )
        .await;
        assert!(recv_message(&mut a).is_some());

        hub.handle(
            a.handle(),
            ClientCommand::Typing(TypingStatus::new("u1", true, "general")),
        )
        .await;
        assert!(a.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_disconnect_removes_membership() {
        let hub = RelayHub::default();
        let a = hub.connect();
        hub.join_room(a.handle(), "general").await;

        hub.disconnect(a.id()).await;

        assert!(hub.registry().members_of("general").await.is_empty());
        assert!(hub.registry().room_of(a.id()).await.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_unjoined_connection() {
        let hub = RelayHub::default();
        let a = hub.connect();
        hub.disconnect(a.id()).await;
        assert_eq!(hub.registry().connection_count().await, 0);
    }
}
