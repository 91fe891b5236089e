//! Handlers for the `/tasks` resource.
//!
//! Starting a task schedules a background job and returns immediately; the
//! job's progress arrives asynchronously over the subscriber's WebSocket.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use taskpulse_core::error::CoreError;
use taskpulse_core::report::JobRequest;
use taskpulse_core::types::SubscriberId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for starting a task.
///
/// Field names match what existing clients send. A malformed `userid`
/// (not a UUID) is rejected during deserialization, before any job exists.
#[derive(Debug, Deserialize)]
pub struct StartTask {
    #[serde(rename = "elementid")]
    pub element_id: String,
    #[serde(rename = "userid")]
    pub subscriber_id: SubscriberId,
}

/// POST /api/v1/tasks
///
/// Start a background job tagged with the caller's subscriber id. Returns
/// 202 immediately; completion is reported asynchronously over WebSocket,
/// not in this response.
pub async fn start_task(
    State(state): State<AppState>,
    Json(input): Json<StartTask>,
) -> AppResult<impl IntoResponse> {
    if input.element_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "elementid must not be empty".to_string(),
        )));
    }

    let request = JobRequest {
        element_id: input.element_id,
        subscriber_id: input.subscriber_id,
        callback_url: state.config.report_callback_url(),
    };

    tracing::info!(
        subscriber_id = %request.subscriber_id,
        element_id = %request.element_id,
        "Task start requested",
    );

    // The handle is dropped on purpose: the job owns its own lifecycle and
    // reports back through the callback endpoint.
    let _handle = state.runner.submit(request);

    Ok(StatusCode::ACCEPTED)
}
