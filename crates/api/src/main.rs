use std::net::SocketAddr;
use std::sync::Arc;

use taskpulse_runner::{HttpCallbackSink, JobRunner, RunnerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskpulse_api::config::ServerConfig;
use taskpulse_api::notifier::Notifier;
use taskpulse_api::router::build_app_router;
use taskpulse_api::state::AppState;
use taskpulse_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskpulse_api=debug,taskpulse_runner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Subscriber registry ---
    let registry = Arc::new(ws::Registry::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&registry));

    // --- Notifier ---
    let notifier = Arc::new(Notifier::new(Arc::clone(&registry)));

    // --- Job runner ---
    let runner_config = RunnerConfig {
        step_interval: config.step_interval(),
        ..RunnerConfig::default()
    };
    let runner = Arc::new(JobRunner::with_config(
        Arc::new(HttpCallbackSink::new()),
        runner_config,
    ));
    tracing::info!(
        callback_url = %config.report_callback_url(),
        "Job runner started",
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::clone(&registry),
        notifier,
        runner,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let count = registry.connection_count().await;
    tracing::info!(count, "Closing remaining WebSocket connections");
    registry.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
