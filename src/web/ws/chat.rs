//! Chat WebSocket handler.
//!
//! Each socket gets a relay connection. Inbound text frames are decoded into
//! commands for the hub; events queued for the connection are written back
//! out. Malformed frames are logged and dropped without a reply.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::relay::RelayHub;

use super::messages::{decode_frame, encode_event};

/// WebSocket relay handler.
///
/// GET {ws_path}
pub async fn chat_ws_handler(ws: WebSocketUpgrade, State(hub): State<Arc<RelayHub>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Run one connection until the client goes away or a send fails.
async fn handle_socket(socket: WebSocket, hub: Arc<RelayHub>) {
    let (connection, mut events) = hub.connect().into_parts();
    let connection_id = connection.id();

    let (mut ws_sender, mut ws_receiver) = socket.split();

    loop {
        tokio::select! {
            frame = ws_receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                        Ok(command) => hub.handle(&connection, command).await,
                        Err(e) => {
                            tracing::debug!(
                                connection_id = %connection_id,
                                error = %e,
                                "dropping malformed frame"
                            );
                        }
                    },
                    Some(Ok(Message::Ping(data))) => {
                        if ws_sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(connection_id = %connection_id, "WebSocket closed by client");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }

            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                match encode_event(&event) {
                    Ok(json) => {
                        if ws_sender.send(Message::Text(json.into())).await.is_err() {
                            tracing::debug!(connection_id = %connection_id, "send failed, closing");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(connection_id = %connection_id, error = %e, "failed to encode event");
                    }
                }
            }
        }
    }

    hub.disconnect(connection_id).await;
}
