use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL jobs post their progress reports back to. Defaults to this
    /// server's own loopback address; point it elsewhere when the runner
    /// executes on another host.
    pub callback_base_url: String,
    /// Pause between job progress steps, in seconds (default: `1`).
    pub step_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CALLBACK_BASE_URL`    | `http://127.0.0.1:{PORT}`  |
    /// | `STEP_INTERVAL_SECS`   | `1`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let callback_base_url = std::env::var("CALLBACK_BASE_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{port}"));

        let step_interval_secs: u64 = std::env::var("STEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("STEP_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            callback_base_url,
            step_interval_secs,
        }
    }

    /// Full URL of the report-ingestion endpoint jobs post back to.
    pub fn report_callback_url(&self) -> String {
        format!(
            "{}/api/v1/events",
            self.callback_base_url.trim_end_matches('/')
        )
    }

    /// Step interval as a [`Duration`].
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs(self.step_interval_secs)
    }
}
