//! Domain types and pure logic shared by the gateway and the job runner.
//!
//! This crate has no internal dependencies and no async code: subscriber
//! identity, job/report types, phrase generation, and the WebSocket event
//! name constants live here so both sides of the pipeline agree on them.

pub mod error;
pub mod events;
pub mod phrase;
pub mod report;
pub mod types;
