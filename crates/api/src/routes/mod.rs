pub mod events;
pub mod health;
pub mod subscribers;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws              WebSocket (subscriber connect/disconnect + progress push)
/// /tasks           start a background job (POST)
/// /events          report ingestion, called by the job runner (POST)
/// /subscribers     diagnostic list of registered subscribers (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/tasks", tasks::router())
        .nest("/events", events::router())
        .nest("/subscribers", subscribers::router())
}
