//! Room registry: which connections are in which room.
//!
//! A connection is in at most one room. Rooms exist only while they have
//! members; the first join creates one and the last leave removes it.
//!
//! All state sits behind a single `RwLock`. Membership changes take the
//! write lock. Fan-out takes the read lock and only ever `try_send`s into
//! connection queues, so deliveries to different rooms run concurrently and
//! the recipient set is exactly the membership at the moment of fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::connection::{ConnectionHandle, ConnectionId, Delivery};
use super::event::ServerEvent;

/// Result of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinResult {
    /// Joined from the unjoined state.
    Joined,
    /// Already a member of the requested room; nothing changed.
    AlreadyJoined,
    /// Left `from` and joined the requested room.
    Switched {
        /// The room that was left.
        from: String,
    },
}

/// Counts from a single fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Connections the event was queued to.
    pub delivered: usize,
    /// Connections whose queue was full.
    pub dropped: usize,
}

/// Information about a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Room ID.
    pub id: String,
    /// Number of members.
    pub member_count: usize,
}

#[derive(Default)]
struct RegistryState {
    /// Members of each room, by room ID.
    rooms: HashMap<String, HashMap<ConnectionId, ConnectionHandle>>,
    /// Current room of each joined connection.
    memberships: HashMap<ConnectionId, String>,
}

impl RegistryState {
    fn leave(&mut self, id: ConnectionId) -> Option<String> {
        let room_id = self.memberships.remove(&id)?;
        if let Some(members) = self.rooms.get_mut(&room_id) {
            members.remove(&id);
            if members.is_empty() {
                self.rooms.remove(&room_id);
            }
        }
        Some(room_id)
    }
}

/// Shared room membership table.
pub struct RoomRegistry {
    state: RwLock<RegistryState>,
}

impl RoomRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Put a connection into `room_id`, leaving its current room first.
    pub async fn join(&self, connection: &ConnectionHandle, room_id: &str) -> JoinResult {
        let id = connection.id();
        let mut state = self.state.write().await;

        if state.memberships.get(&id).map(String::as_str) == Some(room_id) {
            return JoinResult::AlreadyJoined;
        }

        let previous = state.leave(id);
        state
            .rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(id, connection.clone());
        state.memberships.insert(id, room_id.to_string());

        match previous {
            Some(from) => JoinResult::Switched { from },
            None => JoinResult::Joined,
        }
    }

    /// Take a connection out of its current room.
    ///
    /// Returns the room that was left, or `None` if the connection was not
    /// in a room.
    pub async fn leave(&self, id: ConnectionId) -> Option<String> {
        self.state.write().await.leave(id)
    }

    /// Drop every trace of a connection. Called on disconnect.
    pub async fn remove(&self, id: ConnectionId) -> Option<String> {
        self.leave(id).await
    }

    /// Snapshot of the current members of a room.
    pub async fn members_of(&self, room_id: &str) -> Vec<ConnectionId> {
        self.state
            .read()
            .await
            .rooms
            .get(room_id)
            .map(|members| members.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The room a connection is currently in.
    pub async fn room_of(&self, id: ConnectionId) -> Option<String> {
        self.state.read().await.memberships.get(&id).cloned()
    }

    /// Check whether a connection is a member of a room.
    pub async fn is_member(&self, id: ConnectionId, room_id: &str) -> bool {
        self.state.read().await.memberships.get(&id).map(String::as_str) == Some(room_id)
    }

    /// Number of non-empty rooms.
    pub async fn room_count(&self) -> usize {
        self.state.read().await.rooms.len()
    }

    /// Number of connections currently in a room.
    pub async fn connection_count(&self) -> usize {
        self.state.read().await.memberships.len()
    }

    /// List all rooms, sorted by ID.
    pub async fn rooms(&self) -> Vec<RoomInfo> {
        let state = self.state.read().await;
        let mut result: Vec<RoomInfo> = state
            .rooms
            .iter()
            .map(|(id, members)| RoomInfo {
                id: id.clone(),
                member_count: members.len(),
            })
            .collect();

        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }

    /// Queue `event` to every member of `room_id`, skipping `except`.
    ///
    /// A room with no members is not an error; the report is simply empty.
    pub async fn deliver(
        &self,
        room_id: &str,
        event: Arc<ServerEvent>,
        except: Option<ConnectionId>,
    ) -> FanoutReport {
        let state = self.state.read().await;
        let mut report = FanoutReport::default();

        let Some(members) = state.rooms.get(room_id) else {
            return report;
        };

        for (id, handle) in members {
            if Some(*id) == except {
                continue;
            }
            match handle.offer(Arc::clone(&event)) {
                Delivery::Queued => report.delivered += 1,
                Delivery::Full => {
                    report.dropped += 1;
                    tracing::warn!(
                        connection_id = %id,
                        room_id,
                        event = event.name(),
                        "outbound queue full, dropping event"
                    );
                }
                // Socket is closing; the transport removes it shortly.
                Delivery::Closed => {}
            }
        }

        report
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
