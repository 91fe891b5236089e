//! The per-job execution loop.
//!
//! Each submitted job picks a random step count, emits one report per step
//! (with a phrase that refreshes with probability 0.25), sleeps a fixed
//! interval between steps, and finishes with a terminal report carrying the
//! job result. Emission stops as soon as the gateway signals that the
//! target subscriber is gone.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use taskpulse_core::phrase::{PhraseGenerator, WordPoolGenerator};
use taskpulse_core::report::{JobRequest, ProgressReport};

use crate::sink::{DeliveryStatus, ReportSink};

/// Runner tuning knobs.
///
/// Production defaults match the observed job behavior: 1 s between steps,
/// 10 to 50 steps per job. Tests shrink both.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Pause between progress steps.
    pub step_interval: Duration,
    /// Inclusive lower bound on the per-job step count.
    pub min_steps: u32,
    /// Inclusive upper bound on the per-job step count.
    pub max_steps: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_secs(1),
            min_steps: 10,
            max_steps: 50,
        }
    }
}

/// How a job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The job ran all its steps and emitted the terminal report.
    Completed,
    /// The subscriber disconnected mid-run; emission stopped early.
    Abandoned,
}

/// Handle to a running job.
///
/// The job keeps running if the handle is dropped; it exists so callers
/// that care (tests, diagnostics) can await the outcome.
pub struct JobHandle {
    inner: tokio::task::JoinHandle<JobOutcome>,
}

impl JobHandle {
    /// Wait for the job to finish. A panicked job counts as abandoned.
    pub async fn outcome(self) -> JobOutcome {
        self.inner.await.unwrap_or(JobOutcome::Abandoned)
    }
}

/// Spawns and runs background jobs.
pub struct JobRunner {
    config: RunnerConfig,
    sink: Arc<dyn ReportSink>,
}

impl JobRunner {
    /// Create a runner with default configuration.
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self::with_config(sink, RunnerConfig::default())
    }

    /// Create a runner with explicit configuration.
    pub fn with_config(sink: Arc<dyn ReportSink>, config: RunnerConfig) -> Self {
        Self { config, sink }
    }

    /// Submit a job for execution. Returns immediately; the job runs on its
    /// own tokio task, concurrently with the caller and with other jobs.
    pub fn submit(&self, request: JobRequest) -> JobHandle {
        let total = rand::rng().random_range(self.config.min_steps..=self.config.max_steps);
        let sink = Arc::clone(&self.sink);
        let interval = self.config.step_interval;

        tracing::info!(
            subscriber_id = %request.subscriber_id,
            element_id = %request.element_id,
            total,
            "Job submitted",
        );

        let inner = tokio::spawn(async move {
            run_job(request, sink, interval, total, WordPoolGenerator).await
        });
        JobHandle { inner }
    }
}

/// Execute one job to completion (or abandonment).
///
/// Split out from [`JobRunner::submit`] so tests can drive it with a fixed
/// step count and a deterministic phrase generator.
pub async fn run_job(
    request: JobRequest,
    sink: Arc<dyn ReportSink>,
    interval: Duration,
    total: u32,
    mut phrases: impl PhraseGenerator,
) -> JobOutcome {
    let mut status: Option<String> = None;

    for current in 0..total {
        let phrase = phrases.next_phrase(status.as_deref());
        let report = ProgressReport::step(
            &request.element_id,
            request.subscriber_id,
            current,
            total,
            &phrase,
        );
        status = Some(phrase);

        if deliver(&*sink, &request, &report).await == StepDelivery::Gone {
            return JobOutcome::Abandoned;
        }

        tokio::time::sleep(interval).await;
    }

    let report = ProgressReport::terminal(&request.element_id, request.subscriber_id);
    if deliver(&*sink, &request, &report).await == StepDelivery::Gone {
        return JobOutcome::Abandoned;
    }

    tracing::info!(
        subscriber_id = %request.subscriber_id,
        element_id = %request.element_id,
        total,
        "Job completed",
    );
    JobOutcome::Completed
}

#[derive(PartialEq)]
enum StepDelivery {
    Continue,
    Gone,
}

/// Push one report, classifying the result for the job loop.
///
/// A transport failure loses only this report; the loop continues. A
/// gone-subscriber signal stops the job.
async fn deliver(
    sink: &dyn ReportSink,
    request: &JobRequest,
    report: &ProgressReport,
) -> StepDelivery {
    match sink.push(&request.callback_url, report).await {
        Ok(DeliveryStatus::Accepted) => StepDelivery::Continue,
        Ok(DeliveryStatus::SubscriberGone) => {
            tracing::info!(
                subscriber_id = %request.subscriber_id,
                element_id = %request.element_id,
                current = report.current,
                "Subscriber disconnected, stopping progress updates",
            );
            StepDelivery::Gone
        }
        Err(e) => {
            tracing::warn!(
                subscriber_id = %request.subscriber_id,
                current = report.current,
                error = %e,
                "Report delivery failed, dropping this report",
            );
            StepDelivery::Continue
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
