//! taskpulse gateway library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! WebSocket infrastructure, the notifier) so integration tests and the
//! binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
