//! Routes ingested progress reports to their target subscriber.
//!
//! The notifier is deliberately dumb: look the subscriber up, push the
//! report if the connection is there, report `SubscriberNotFound` if it is
//! not. A missing subscriber is an expected, routine outcome (the client
//! navigated away), not a defect. No retry, no buffering: a report that
//! cannot be delivered is dropped.

use std::sync::Arc;

use serde_json::json;
use taskpulse_core::events::EVENT_PROGRESS;
use taskpulse_core::report::ProgressReport;

use crate::ws::protocol;
use crate::ws::Registry;

/// Result of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The report was pushed onto the subscriber's outbound channel.
    Delivered,
    /// No such subscriber is registered.
    SubscriberNotFound,
}

/// Pushes progress reports to registered subscribers.
pub struct Notifier {
    registry: Arc<Registry>,
}

impl Notifier {
    /// Create a notifier over the shared registry.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Deliver one report to its tagged subscriber, if registered.
    pub async fn deliver(&self, report: &ProgressReport) -> DeliveryResult {
        let Some(sender) = self.registry.lookup(report.subscriber_id).await else {
            tracing::debug!(
                subscriber_id = %report.subscriber_id,
                current = report.current,
                "Report for unknown subscriber, dropping",
            );
            return DeliveryResult::SubscriberNotFound;
        };

        let msg = protocol::envelope(EVENT_PROGRESS, json!(report));
        if sender.send(msg).is_err() {
            // Connection tore down between lookup and send; the report is
            // dropped and the disconnect cleanup will unregister the id.
            tracing::debug!(
                subscriber_id = %report.subscriber_id,
                current = report.current,
                "Subscriber channel closed, report dropped",
            );
        }
        DeliveryResult::Delivered
    }
}
