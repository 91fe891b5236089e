//! Report-ingestion handler.
//!
//! Jobs (possibly running in another process) post each progress report
//! here. The response status is how the runner learns whether the target
//! subscriber is still connected: 200 means delivered, 404 means gone.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use taskpulse_core::report::ProgressReport;

use crate::notifier::DeliveryResult;
use crate::state::AppState;

/// POST /api/v1/events
///
/// Forward a progress report to the notifier. A 404 here is routine, not
/// an error: it tells the reporting job the client has navigated away.
pub async fn ingest_report(
    State(state): State<AppState>,
    Json(report): Json<ProgressReport>,
) -> impl IntoResponse {
    match state.notifier.deliver(&report).await {
        DeliveryResult::Delivered => {
            (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
        }
        DeliveryResult::SubscriberNotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Subscriber is not connected",
                "code": "SUBSCRIBER_NOT_FOUND",
            })),
        )
            .into_response(),
    }
}
