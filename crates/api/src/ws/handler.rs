use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use taskpulse_core::types::SubscriberId;

use crate::state::AppState;
use crate::ws::protocol::{self, ClientEvent};
use crate::ws::registry::Registry;

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection gets a fresh [`SubscriberId`], is
/// registered with the [`Registry`], and is managed by two tasks
/// (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers a fresh subscriber id with the registry.
///   2. Pushes the `userid` and connect `status` acknowledgments.
///   3. Spawns a sender task that forwards messages from the registry channel.
///   4. Processes inbound events on the current task.
///   5. Unregisters on disconnect (idempotent).
async fn handle_socket(socket: WebSocket, registry: Arc<Registry>) {
    let subscriber_id = SubscriberId::new();
    tracing::info!(subscriber_id = %subscriber_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = registry.register(subscriber_id).await;

    // Acknowledge the connect before any progress can be routed here.
    if let Some(sender) = registry.lookup(subscriber_id).await {
        let _ = sender.send(protocol::userid_event(subscriber_id));
        let _ = sender.send(protocol::connected_event(subscriber_id));
    }

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(subscriber_id = %subscriber_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound events.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(subscriber_id = %subscriber_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                if !handle_client_event(&registry, subscriber_id, &text).await {
                    break;
                }
            }
            Ok(_msg) => {
                // Binary and other frame types are not part of the protocol.
            }
            Err(e) => {
                tracing::debug!(subscriber_id = %subscriber_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: unregister and abort the sender task.
    registry.unregister(subscriber_id).await;
    send_task.abort();
    tracing::info!(subscriber_id = %subscriber_id, "WebSocket disconnected");
}

/// Dispatch one inbound text frame. Returns `false` when the connection
/// should close.
async fn handle_client_event(registry: &Registry, subscriber_id: SubscriberId, text: &str) -> bool {
    let Some(sender) = registry.lookup(subscriber_id).await else {
        return false;
    };

    match ClientEvent::parse(text) {
        Some(ClientEvent::Status { status }) => {
            let _ = sender.send(protocol::status_event(&status));
            true
        }
        Some(ClientEvent::DisconnectRequest) => {
            // Acknowledge, then close. The cleanup path unregisters.
            let _ = sender.send(protocol::status_event(protocol::STATUS_DISCONNECTED));
            let _ = sender.send(Message::Close(None));
            false
        }
        None => {
            tracing::debug!(subscriber_id = %subscriber_id, "Ignoring unrecognized frame");
            true
        }
    }
}
