//! Route definitions for the `/tasks` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /    -> start_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(tasks::start_task))
}
