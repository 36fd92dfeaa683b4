//! Structured logging initialization.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::TelemetryConfig;
use crate::TelemetryError;

/// Install a global `tracing` subscriber configured from `config`.
/// Should be called once, near the start of `main`.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let result = if config.json_logs {
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        FmtSubscriber::builder().with_env_filter(filter).try_init()
    };

    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
