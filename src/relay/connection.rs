//! Per-connection identity and outbound queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use super::event::ServerEvent;

/// Unique identifier for a client connection, assigned at accept time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Create a new random connection ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of offering an event to a connection's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The event was queued.
    Queued,
    /// The queue was full; the event was dropped for this connection.
    Full,
    /// The connection is gone.
    Closed,
}

/// Cloneable sending side of a connection, stored in the room registry.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::Sender<Arc<ServerEvent>>,
}

impl ConnectionHandle {
    /// Get the connection ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event without waiting.
    pub fn offer(&self, event: Arc<ServerEvent>) -> Delivery {
        match self.outbound.try_send(event) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => Delivery::Full,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }
}

/// A live connection: its handle plus the receiving end of its queue.
///
/// The transport owns this for the lifetime of the socket.
pub struct Connection {
    handle: ConnectionHandle,
    events: mpsc::Receiver<Arc<ServerEvent>>,
}

impl Connection {
    /// Create a connection with a bounded outbound queue.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        let (outbound, events) = mpsc::channel(capacity);
        Self {
            handle: ConnectionHandle {
                id: ConnectionId::new(),
                outbound,
            },
            events,
        }
    }

    /// Get the connection ID.
    pub fn id(&self) -> ConnectionId {
        self.handle.id
    }

    /// Get the sending handle.
    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }

    /// Wait for the next outbound event.
    pub async fn recv(&mut self) -> Option<Arc<ServerEvent>> {
        self.events.recv().await
    }

    /// Take the next outbound event if one is queued.
    pub fn try_recv(&mut self) -> Option<Arc<ServerEvent>> {
        self.events.try_recv().ok()
    }

    /// Split into the handle and the event receiver.
    pub fn into_parts(self) -> (ConnectionHandle, mpsc::Receiver<Arc<ServerEvent>>) {
        (self.handle, self.events)
    }
}
