//! Diagnostic listing of registered subscribers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subscribers
///
/// List the currently registered subscriber ids. Diagnostic only; the set
/// is ephemeral and valid only for this process lifetime.
pub async fn list_subscribers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ids = state.registry.subscriber_ids().await;
    Ok(Json(DataResponse { data: ids }))
}
