//! Background job runner.
//!
//! Jobs are submitted by the gateway and run on independently scheduled
//! tokio tasks, posting progress reports back to the gateway's
//! report-ingestion endpoint. Submission never blocks the caller; the
//! gateway learns about progress only through the reports.

pub mod runner;
pub mod sink;

pub use runner::{JobHandle, JobOutcome, JobRunner, RunnerConfig};
pub use sink::{DeliveryStatus, HttpCallbackSink, ReportSink, SinkError};
