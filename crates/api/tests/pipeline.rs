//! End-to-end pipeline tests: job loop -> notifier -> registry -> connection
//! channel, with the HTTP hop replaced by an in-process sink.
//!
//! These cover the routing properties that matter: per-job ordering, the
//! explicit terminal marker, isolation between subscribers, and the
//! stop-on-disconnect behaviour.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ws::Message;
use taskpulse_api::notifier::{DeliveryResult, Notifier};
use taskpulse_api::ws::Registry;
use taskpulse_core::events::EVENT_PROGRESS;
use taskpulse_core::phrase::PhraseGenerator;
use taskpulse_core::report::{JobRequest, ProgressReport, TERMINAL_RESULT, TERMINAL_STATUS};
use taskpulse_core::types::SubscriberId;
use taskpulse_runner::runner::{run_job, JobOutcome};
use taskpulse_runner::{DeliveryStatus, ReportSink, SinkError};
use tokio::sync::mpsc::UnboundedReceiver;

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

/// Deterministic phrase source.
struct FixedPhrases;

impl PhraseGenerator for FixedPhrases {
    fn next_phrase(&mut self, _previous: Option<&str>) -> String {
        "Checking harmonic bit...".to_string()
    }
}

/// Sink that hands reports straight to the notifier, skipping HTTP.
///
/// Optionally unregisters the target subscriber after a number of
/// deliveries, simulating a client that navigates away mid-job.
struct NotifierSink {
    notifier: Notifier,
    registry: Arc<Registry>,
    delivered: AtomicU32,
    unregister_after: Option<u32>,
}

impl NotifierSink {
    fn new(registry: Arc<Registry>) -> Self {
        Self {
            notifier: Notifier::new(Arc::clone(&registry)),
            registry,
            delivered: AtomicU32::new(0),
            unregister_after: None,
        }
    }
}

#[async_trait]
impl ReportSink for NotifierSink {
    async fn push(
        &self,
        _callback_url: &str,
        report: &ProgressReport,
    ) -> Result<DeliveryStatus, SinkError> {
        if let Some(limit) = self.unregister_after {
            if self.delivered.load(Ordering::SeqCst) >= limit {
                self.registry.unregister(report.subscriber_id).await;
            }
        }
        match self.notifier.deliver(report).await {
            DeliveryResult::Delivered => {
                self.delivered.fetch_add(1, Ordering::SeqCst);
                Ok(DeliveryStatus::Accepted)
            }
            DeliveryResult::SubscriberNotFound => Ok(DeliveryStatus::SubscriberGone),
        }
    }
}

fn request_for(subscriber_id: SubscriberId, element_id: &str) -> JobRequest {
    JobRequest {
        element_id: element_id.to_string(),
        subscriber_id,
        callback_url: "http://gateway.test/api/v1/events".to_string(),
    }
}

/// Unwrap a `celerystatus` envelope back into a [`ProgressReport`].
fn parse_report(msg: Message) -> ProgressReport {
    let Message::Text(text) = msg else {
        panic!("expected a text frame, got: {msg:?}");
    };
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["event"], EVENT_PROGRESS);
    serde_json::from_value(value["data"].clone()).unwrap()
}

fn drain_reports(rx: &mut UnboundedReceiver<Message>) -> Vec<ProgressReport> {
    let mut reports = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        reports.push(parse_report(msg));
    }
    reports
}

// ---------------------------------------------------------------------------
// Test: full happy-path scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connected_subscriber_receives_ordered_progress_and_terminal() {
    let registry = Arc::new(Registry::new());
    let id = SubscriberId::new();
    let mut rx = registry.register(id).await;

    let sink = Arc::new(NotifierSink::new(Arc::clone(&registry)));
    let outcome = run_job(
        request_for(id, "e1"),
        sink,
        Duration::ZERO,
        5,
        FixedPhrases,
    )
    .await;
    assert_eq!(outcome, JobOutcome::Completed);

    let reports = drain_reports(&mut rx);
    assert_eq!(reports.len(), 6);

    for (i, report) in reports[..5].iter().enumerate() {
        assert_eq!(report.current, i as u32);
        assert_eq!(report.total, 5);
        assert_eq!(report.element_id, "e1");
        assert_eq!(report.subscriber_id, id);
        assert!(!report.is_final);
    }

    let terminal = &reports[5];
    assert!(terminal.is_final);
    assert_eq!(terminal.status, TERMINAL_STATUS);
    assert_eq!(terminal.result, Some(TERMINAL_RESULT));
}

// ---------------------------------------------------------------------------
// Test: a 30-step run delivers index 29, then the terminal report
// ---------------------------------------------------------------------------

#[tokio::test]
async fn thirty_step_run_delivers_last_step_then_terminal() {
    let registry = Arc::new(Registry::new());
    let id = SubscriberId::new();
    let mut rx = registry.register(id).await;

    let sink = Arc::new(NotifierSink::new(Arc::clone(&registry)));
    let outcome = run_job(
        request_for(id, "e1"),
        sink,
        Duration::ZERO,
        30,
        FixedPhrases,
    )
    .await;
    assert_eq!(outcome, JobOutcome::Completed);

    let reports = drain_reports(&mut rx);
    assert_eq!(reports.len(), 31);
    assert_eq!(reports[29].current, 29);
    assert!(!reports[29].is_final);
    assert!(reports[30].is_final);
}

// ---------------------------------------------------------------------------
// Test: disconnect mid-job stops delivery AND emission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disconnect_mid_job_stops_updates() {
    let registry = Arc::new(Registry::new());
    let id = SubscriberId::new();
    let mut rx = registry.register(id).await;

    let mut sink = NotifierSink::new(Arc::clone(&registry));
    sink.unregister_after = Some(3);

    let outcome = run_job(
        request_for(id, "e1"),
        Arc::new(sink),
        Duration::ZERO,
        20,
        FixedPhrases,
    )
    .await;
    assert_eq!(outcome, JobOutcome::Abandoned);

    // Exactly the three pre-disconnect reports arrived; no terminal.
    let reports = drain_reports(&mut rx);
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| !r.is_final));

    // The registry no longer knows the subscriber.
    assert!(registry.lookup(id).await.is_none());
}

// ---------------------------------------------------------------------------
// Test: delivery for an unregistered id leaves the registry untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_subscriber_delivery_has_no_side_effects() {
    let registry = Arc::new(Registry::new());
    let bystander = SubscriberId::new();
    let mut rx = registry.register(bystander).await;

    let notifier = Notifier::new(Arc::clone(&registry));
    let report = ProgressReport::step("e1", SubscriberId::new(), 0, 10, "x");
    let result = notifier.deliver(&report).await;
    assert_eq!(result, DeliveryResult::SubscriberNotFound);

    // The registered bystander is unaffected and received nothing.
    assert_eq!(registry.connection_count().await, 1);
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: two concurrent jobs never cross-deliver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_jobs_never_cross_deliver() {
    let registry = Arc::new(Registry::new());
    let id_a = SubscriberId::new();
    let id_b = SubscriberId::new();
    let mut rx_a = registry.register(id_a).await;
    let mut rx_b = registry.register(id_b).await;

    let sink: Arc<dyn ReportSink> = Arc::new(NotifierSink::new(Arc::clone(&registry)));

    let job_a = run_job(
        request_for(id_a, "ea"),
        Arc::clone(&sink),
        Duration::ZERO,
        8,
        FixedPhrases,
    );
    let job_b = run_job(
        request_for(id_b, "eb"),
        Arc::clone(&sink),
        Duration::ZERO,
        8,
        FixedPhrases,
    );
    let (out_a, out_b) = tokio::join!(job_a, job_b);
    assert_eq!(out_a, JobOutcome::Completed);
    assert_eq!(out_b, JobOutcome::Completed);

    let reports_a = drain_reports(&mut rx_a);
    let reports_b = drain_reports(&mut rx_b);
    assert_eq!(reports_a.len(), 9);
    assert_eq!(reports_b.len(), 9);

    assert!(reports_a.iter().all(|r| r.subscriber_id == id_a));
    assert!(reports_a.iter().all(|r| r.element_id == "ea"));
    assert!(reports_b.iter().all(|r| r.subscriber_id == id_b));
    assert!(reports_b.iter().all(|r| r.element_id == "eb"));

    // Ordering holds per subscriber despite interleaved execution.
    let steps_a: Vec<u32> = reports_a[..8].iter().map(|r| r.current).collect();
    assert_eq!(steps_a, (0..8).collect::<Vec<_>>());
}
