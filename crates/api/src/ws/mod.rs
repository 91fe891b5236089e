//! WebSocket infrastructure for live progress delivery.
//!
//! Provides the subscriber registry, heartbeat monitoring, the inbound
//! event protocol, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod protocol;
pub mod registry;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use registry::{Registry, WsSender};
