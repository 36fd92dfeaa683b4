//! Adapter wiring [`crate::ports::outbound::MetricsSink`] to the
//! Prometheus counters and histogram exposed by `bls-telemetry`.

use bls_telemetry::metrics as telemetry;

use crate::ports::outbound::MetricsSink;

/// Production [`MetricsSink`] backed by the process-global Prometheus
/// registry. Construct one instance and share it (it's `Send + Sync`
/// and holds no state of its own; the counters live in
/// `bls_telemetry::metrics`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PrometheusMetricsSink;

impl MetricsSink for PrometheusMetricsSink {
    fn record_batch_success(&self, weight: usize) {
        telemetry::BATCH_SIGS_SUCCESS.inc_by(weight as f64);
    }

    fn record_batch_retry(&self, _weight: usize) {
        telemetry::BATCH_RETRIES.inc();
    }

    fn record_individual_verify(&self, success: bool) {
        if success {
            telemetry::INDIVIDUAL_VERIFICATIONS_SUCCESS.inc();
        } else {
            telemetry::INDIVIDUAL_VERIFICATIONS_FAILURE.inc();
        }
    }

    fn record_cancelled(&self) {
        telemetry::JOBS_CANCELLED.inc();
    }

    fn record_request(&self, _jobs: usize, elapsed: std::time::Duration) {
        telemetry::REQUESTS_PROCESSED.inc();
        telemetry::REQUEST_DURATION.observe(elapsed.as_secs_f64());
    }
}
