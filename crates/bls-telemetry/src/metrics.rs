//! Prometheus metrics for the batch BLS verification engine.
//!
//! Naming convention: `bls_<metric>_<unit>`.

use lazy_static::lazy_static;
use prometheus::{exponential_buckets, Counter, Histogram, HistogramOpts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry for this process.
    pub static ref REGISTRY: Registry = Registry::new();

    /// Signature sets admitted via a successful randomized batch call.
    pub static ref BATCH_SIGS_SUCCESS: Counter = Counter::new(
        "bls_batch_sigs_success_total",
        "Signature sets verified successfully as part of a batch"
    ).expect("metric creation failed");

    /// Chunks whose batch verification failed and were demoted to
    /// individual verification.
    pub static ref BATCH_RETRIES: Counter = Counter::new(
        "bls_batch_retries_total",
        "Chunks demoted from batch to individual verification"
    ).expect("metric creation failed");

    /// Jobs verified individually (demoted or never batchable), by
    /// outcome.
    pub static ref INDIVIDUAL_VERIFICATIONS_SUCCESS: Counter = Counter::new(
        "bls_individual_verifications_success_total",
        "Jobs verified individually that turned out valid"
    ).expect("metric creation failed");

    pub static ref INDIVIDUAL_VERIFICATIONS_FAILURE: Counter = Counter::new(
        "bls_individual_verifications_failure_total",
        "Jobs verified individually that turned out invalid"
    ).expect("metric creation failed");

    /// Jobs cancelled before a verdict was reached.
    pub static ref JOBS_CANCELLED: Counter = Counter::new(
        "bls_jobs_cancelled_total",
        "Jobs cancelled before verification completed"
    ).expect("metric creation failed");

    /// Requests processed by a worker.
    pub static ref REQUESTS_PROCESSED: Counter = Counter::new(
        "bls_requests_processed_total",
        "Requests processed by a worker runtime"
    ).expect("metric creation failed");

    /// Wall-clock time a worker spent on one request, start to finish.
    pub static ref REQUEST_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "bls_request_duration_seconds",
            "Time a worker spent processing one request"
        ).buckets(exponential_buckets(0.0005, 2.0, 16).unwrap())
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Call once at
/// startup, before `encode_metrics` is ever invoked.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BATCH_SIGS_SUCCESS.clone()),
        Box::new(BATCH_RETRIES.clone()),
        Box::new(INDIVIDUAL_VERIFICATIONS_SUCCESS.clone()),
        Box::new(INDIVIDUAL_VERIFICATIONS_FAILURE.clone()),
        Box::new(JOBS_CANCELLED.clone()),
        Box::new(REQUESTS_PROCESSED.clone()),
        Box::new(REQUEST_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all registered metrics as Prometheus text format, for a
/// `/metrics` scrape endpoint.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
