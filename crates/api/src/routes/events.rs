//! Route definitions for the `/events` report-ingestion endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /    -> ingest_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(events::ingest_report))
}
