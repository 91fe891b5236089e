//! Job submission and progress report types.
//!
//! Field names on the wire (`elementid`, `userid`, `current`, `total`)
//! match what existing clients already parse. The terminal report is
//! distinguished by the explicit `final` flag; the legacy `100/100`
//! counter values are still emitted for those clients but nothing in this
//! codebase branches on them.

use serde::{Deserialize, Serialize};

use crate::types::SubscriberId;

/// Status message carried by the terminal report.
pub const TERMINAL_STATUS: &str = "Task completed!";

/// Result value carried by the terminal report.
pub const TERMINAL_RESULT: i64 = 42;

/// Legacy counter value emitted on the terminal report (`current == total == 100`).
pub const TERMINAL_SENTINEL: u32 = 100;

/// A request to run one background job, consumed once by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Opaque UI target token; echoed back on every report so the client
    /// knows which page element the update belongs to.
    pub element_id: String,
    /// The subscriber the job's reports are routed to.
    pub subscriber_id: SubscriberId,
    /// Report-ingestion endpoint the runner posts progress back to.
    pub callback_url: String,
}

/// One unit of progress emitted by a running job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// 0-based step index, strictly increasing within a job.
    pub current: u32,
    /// Expected step count, fixed at job start.
    pub total: u32,
    /// Human-readable status phrase.
    pub status: String,
    #[serde(rename = "elementid")]
    pub element_id: String,
    #[serde(rename = "userid")]
    pub subscriber_id: SubscriberId,
    /// Set on the terminal report only.
    #[serde(rename = "final", default)]
    pub is_final: bool,
    /// Job result, present on the terminal report only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<i64>,
}

impl ProgressReport {
    /// Build an ordinary (non-terminal) report for step `current` of `total`.
    pub fn step(
        element_id: impl Into<String>,
        subscriber_id: SubscriberId,
        current: u32,
        total: u32,
        status: impl Into<String>,
    ) -> Self {
        Self {
            current,
            total,
            status: status.into(),
            element_id: element_id.into(),
            subscriber_id,
            is_final: false,
            result: None,
        }
    }

    /// Build the terminal report carrying the job result.
    pub fn terminal(element_id: impl Into<String>, subscriber_id: SubscriberId) -> Self {
        Self {
            current: TERMINAL_SENTINEL,
            total: TERMINAL_SENTINEL,
            status: TERMINAL_STATUS.to_string(),
            element_id: element_id.into(),
            subscriber_id,
            is_final: true,
            result: Some(TERMINAL_RESULT),
        }
    }
}
