//! Logging configuration sourced from the environment.

use std::env;

/// Minimal telemetry configuration: this crate carries structured
/// logging and a Prometheus registry only. There is no outbound RPC
/// surface for a batch verification worker to correlate traces across,
/// so unlike a full node subsystem this config has no OTLP endpoint.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit JSON-formatted logs instead of the human-readable default.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Load from the environment.
    ///
    /// - `BLS_LOG_LEVEL` or `RUST_LOG`: log level filter (default `info`)
    /// - `BLS_JSON_LOGS`: emit JSON logs (default `false`, `true` inside
    ///   a detected container)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            log_level: env::var("BLS_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("BLS_JSON_LOGS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(is_container),
        }
    }
}
