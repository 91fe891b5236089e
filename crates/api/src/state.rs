use std::sync::Arc;

use taskpulse_runner::JobRunner;

use crate::config::ServerConfig;
use crate::notifier::Notifier;
use crate::ws::Registry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The registry is
/// the only shared mutable structure in the system; everything else here is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Subscriber registry (live WebSocket connections).
    pub registry: Arc<Registry>,
    /// Routes ingested progress reports to registered subscribers.
    pub notifier: Arc<Notifier>,
    /// Background job runner.
    pub runner: Arc<JobRunner>,
}
