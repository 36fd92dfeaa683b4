//! # BLS Telemetry
//!
//! Structured logging and Prometheus metrics for the batch BLS
//! verification engine. Deliberately narrower than a full node's
//! observability stack: a verification worker has no outbound RPC
//! surface to correlate distributed traces across, so this crate
//! carries `tracing` + `prometheus` and stops there.

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::register_metrics;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid telemetry configuration: {0}")]
    Config(String),

    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("failed to initialize metrics: {0}")]
    MetricsInit(String),
}
