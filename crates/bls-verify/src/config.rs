//! # Worker Configuration
//!
//! Tunables for one [`crate::service::WorkerRuntime`], with a
//! constructor that validates and an `from_env` loader for the common
//! case of configuring a node process from its environment.

use crate::domain::chunker::BATCHABLE_MIN_PER_CHUNK;
use crate::domain::errors::ConfigError;

/// Environment variable naming the minimum weight per chunk.
pub const ENV_BATCHABLE_MIN_PER_CHUNK: &str = "BLS_BATCHABLE_MIN_PER_CHUNK";
/// Environment variable toggling opt-in parallel chunk verification.
pub const ENV_PARALLEL_CHUNKS: &str = "BLS_PARALLEL_CHUNKS";

/// Configuration for a single [`crate::service::WorkerRuntime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    pub batchable_min_per_chunk: usize,
    pub parallel_chunks: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            batchable_min_per_chunk: BATCHABLE_MIN_PER_CHUNK,
            parallel_chunks: false,
        }
    }
}

impl WorkerConfig {
    /// Validate the tunables, returning the config unchanged on success.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=1024).contains(&self.batchable_min_per_chunk) {
            return Err(ConfigError::ChunkThresholdOutOfRange(
                self.batchable_min_per_chunk,
            ));
        }
        Ok(self)
    }

    /// Load from the process environment, falling back to defaults for
    /// variables that are unset. Returns an error if a set variable is
    /// present but unparsable or out of range.
    ///
    /// Recognized variables:
    /// - `BLS_BATCHABLE_MIN_PER_CHUNK` (integer, default 16)
    /// - `BLS_PARALLEL_CHUNKS` (`"true"`/`"false"`, default `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_BATCHABLE_MIN_PER_CHUNK) {
            config.batchable_min_per_chunk = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::ChunkThresholdOutOfRange(0))?;
        }

        if let Ok(raw) = std::env::var(ENV_PARALLEL_CHUNKS) {
            config.parallel_chunks = matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1");
        }

        config.validate()
    }
}
