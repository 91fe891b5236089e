//! Wire protocol for the client-facing WebSocket channel.
//!
//! Every frame is a JSON envelope `{ "event": ..., "data": ... }`. Inbound
//! frames deserialize into [`ClientEvent`]; outbound frames are built by
//! the helper functions here and by the notifier. Event names are shared
//! with existing clients via the constants in `taskpulse_core::events`.

use axum::extract::ws::Message;
use serde::Deserialize;
use serde_json::json;
use taskpulse_core::events::{EVENT_STATUS, EVENT_USERID};
use taskpulse_core::types::SubscriberId;

/// Status text pushed right after connect.
pub const STATUS_CONNECTED: &str = "Connected user";

/// Status text acknowledging a disconnect request.
pub const STATUS_DISCONNECTED: &str = "Disconnected!";

/// Events a client may send to the gateway.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Free-form status text; the gateway echoes it back.
    Status { status: String },
    /// Ask the gateway to acknowledge and close the connection.
    DisconnectRequest,
}

impl ClientEvent {
    /// Parse a text frame into a client event, if it is one.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// `userid` event: the freshly assigned subscriber id.
pub fn userid_event(id: SubscriberId) -> Message {
    envelope(EVENT_USERID, json!({ "userid": id }))
}

/// `status` event announcing a successful connect.
pub fn connected_event(id: SubscriberId) -> Message {
    envelope(
        EVENT_STATUS,
        json!({ "status": STATUS_CONNECTED, "userid": id }),
    )
}

/// `status` event with plain status text (echoes, disconnect ack).
pub fn status_event(status: &str) -> Message {
    envelope(EVENT_STATUS, json!({ "status": status }))
}

/// Wrap an event name and payload into a text frame.
pub fn envelope(event: &str, data: serde_json::Value) -> Message {
    let payload = json!({ "event": event, "data": data });
    Message::Text(payload.to_string().into())
}
