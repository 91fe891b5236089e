//! Report delivery seam between a running job and the gateway.
//!
//! [`HttpCallbackSink`] is the production implementation: it POSTs each
//! report as JSON to the job's callback URL. A 404 response is not a
//! failure — it is the gateway's way of saying the target subscriber has
//! disconnected. Individual delivery failures are surfaced to the job loop,
//! which drops that one report and keeps going; there is no retry and no
//! buffering.

use std::time::Duration;

use async_trait::async_trait;
use taskpulse_core::report::ProgressReport;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a successful delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The gateway accepted the report.
    Accepted,
    /// The gateway no longer knows the report's subscriber; the job should
    /// stop emitting.
    SubscriberGone,
}

/// Error type for report delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The underlying HTTP request failed (network, DNS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned an unexpected status code.
    #[error("Report ingestion returned HTTP {0}")]
    HttpStatus(u16),
}

/// Destination for a job's progress reports.
///
/// Object-safe so the runner can hold it behind an `Arc<dyn ReportSink>`
/// and tests can substitute an in-process recording sink.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Attempt to deliver one report to `callback_url`.
    async fn push(
        &self,
        callback_url: &str,
        report: &ProgressReport,
    ) -> Result<DeliveryStatus, SinkError>;
}

/// Delivers reports to the gateway over HTTP POST.
pub struct HttpCallbackSink {
    client: reqwest::Client,
}

impl HttpCallbackSink {
    /// Create a sink with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }
}

impl Default for HttpCallbackSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportSink for HttpCallbackSink {
    async fn push(
        &self,
        callback_url: &str,
        report: &ProgressReport,
    ) -> Result<DeliveryStatus, SinkError> {
        let response = self.client.post(callback_url).json(report).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(DeliveryStatus::SubscriberGone);
        }
        if !status.is_success() {
            return Err(SinkError::HttpStatus(status.as_u16()));
        }
        Ok(DeliveryStatus::Accepted)
    }
}
