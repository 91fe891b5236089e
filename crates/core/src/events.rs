//! WebSocket event name constants.
//!
//! Used by the gateway when exchanging events with browser clients. Names
//! are kept identical to what existing clients emit and listen for.

/// Server -> client: the freshly assigned subscriber id, sent on connect.
pub const EVENT_USERID: &str = "userid";

/// Bidirectional: human-readable connection status.
pub const EVENT_STATUS: &str = "status";

/// Server -> client: one progress report from a running job.
pub const EVENT_PROGRESS: &str = "celerystatus";

/// Client -> server: ask the gateway to acknowledge and close the connection.
pub const EVENT_DISCONNECT_REQUEST: &str = "disconnect-request";
