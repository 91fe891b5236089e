//! Route definitions for the `/subscribers` diagnostic resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subscribers;
use crate::state::AppState;

/// Routes mounted at `/subscribers`.
///
/// ```text
/// GET    /    -> list_subscribers
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(subscribers::list_subscribers))
}
