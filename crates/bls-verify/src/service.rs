//! # Worker Runtime
//!
//! Wires the pure [`crate::domain::batch_verifier::BatchVerifier`] to a
//! dedicated executor: one worker owns one OS thread and processes
//! submitted requests one at a time, cooperatively checking for
//! cancellation between chunks and between individual jobs.
//!
//! Mirrors the request/reply-channel shape of an event-bus IPC
//! receiver: a `tokio::sync::mpsc` channel carries inbound messages, a
//! `oneshot` embedded in each message carries the reply back, giving
//! callers an `async fn submit()` that reads as if it were synchronous.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::config::WorkerConfig;
use crate::domain::batch_verifier::{BatchVerifier, BatchVerifierConfig};
use crate::domain::entities::{BatchMetrics, BlsWorkResult, WorkReq, WorkResult};
use crate::domain::errors::{SignatureError, WorkerError};
use crate::ports::inbound::BlsVerificationApi;
use crate::ports::outbound::{Clock, MetricsSink, NoopMetricsSink, SystemClock};

/// Cooperative cancellation flag shared between a [`WorkerHandle`] and
/// its [`WorkerRuntime`]. Checked at suspension points (before each
/// chunk, before each individual job) rather than torn down eagerly;
/// work already past a check point still completes.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the runtime can accept further requests after a
    /// cancelled one.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct SubmitMsg {
    jobs: Vec<WorkReq>,
    reply: oneshot::Sender<BlsWorkResult>,
}

/// A running worker. Dropping every [`WorkerHandle`] for a runtime lets
/// its background task exit once the channel drains.
pub struct WorkerRuntime {
    task: JoinHandle<()>,
}

impl WorkerRuntime {
    /// Spawn a worker backed by `config`, reporting through `metrics`.
    /// Returns a runtime handle (for lifecycle management) and a
    /// cloneable [`WorkerHandle`] (for submitting work).
    pub fn spawn(config: WorkerConfig, metrics: Arc<dyn MetricsSink>) -> (Self, WorkerHandle) {
        Self::spawn_with_clock(config, metrics, Arc::new(SystemClock))
    }

    /// As [`Self::spawn`], but with an injectable clock, used by tests
    /// that need deterministic timestamps.
    pub fn spawn_with_clock(
        config: WorkerConfig,
        metrics: Arc<dyn MetricsSink>,
        clock: Arc<dyn Clock>,
    ) -> (Self, WorkerHandle) {
        let (tx, mut rx) = mpsc::channel::<SubmitMsg>(64);
        let cancellation = CancellationFlag::new();
        let worker_cancellation = cancellation.clone();

        let verifier_config = BatchVerifierConfig {
            batchable_min_per_chunk: config.batchable_min_per_chunk,
            parallel_chunks: config.parallel_chunks,
        };

        let task = tokio::task::spawn_blocking(move || {
            debug!(batchable_min_per_chunk = verifier_config.batchable_min_per_chunk,
                   parallel_chunks = verifier_config.parallel_chunks,
                   "bls worker started");
            while let Some(msg) = rx.blocking_recv() {
                let is_cancelled = || worker_cancellation.is_cancelled();
                let result = run_guarded(&msg.jobs, verifier_config, &is_cancelled, clock.as_ref(), metrics.as_ref());
                worker_cancellation.reset();
                if msg.reply.send(result).is_err() {
                    warn!("bls worker reply channel dropped before delivery");
                }
            }
            debug!("bls worker stopped");
        });

        let handle = WorkerHandle {
            tx,
            cancellation,
        };

        (Self { task }, handle)
    }

    /// Wait for the worker's background task to finish (after all
    /// handles have been dropped and the channel has drained).
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!(error = %e, "bls worker task panicked or was cancelled outside the guarded run");
        }
    }

    /// Forcibly stop the worker, abandoning any request currently
    /// in-flight. Handles that submit afterward observe
    /// [`WorkerError::RuntimeGone`].
    pub fn abort(self) {
        self.task.abort();
    }
}

/// Run the batch verifier, containing any panic so that a single
/// catastrophic failure degrades to an error result for the whole
/// request rather than taking the worker thread down.
fn run_guarded(
    jobs: &[WorkReq],
    config: BatchVerifierConfig,
    is_cancelled: &dyn Fn() -> bool,
    clock: &dyn Clock,
    metrics: &dyn MetricsSink,
) -> BlsWorkResult {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        BatchVerifier::run(jobs, config, is_cancelled, clock, metrics)
    }));

    match outcome {
        Ok(result) => result,
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!(error = %reason, "bls worker run panicked; failing entire request");
            let now = clock.now();
            BlsWorkResult {
                results: vec![
                    WorkResult::Error {
                        reason: SignatureError::InternalError(reason.clone())
                    };
                    jobs.len()
                ],
                metrics: BatchMetrics::zero(now),
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// A cheaply-cloneable submission endpoint for a [`WorkerRuntime`].
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::Sender<SubmitMsg>,
    cancellation: CancellationFlag,
}

impl WorkerHandle {
    /// Construct a handle with a no-op metrics sink and default config,
    /// returning both the handle and the runtime owning its worker
    /// thread. Convenience for callers that don't need telemetry wired
    /// in.
    pub fn spawn_default() -> (WorkerRuntime, WorkerHandle) {
        WorkerRuntime::spawn(WorkerConfig::default(), Arc::new(NoopMetricsSink))
    }
}

#[async_trait]
impl BlsVerificationApi for WorkerHandle {
    async fn submit(&self, jobs: Vec<WorkReq>) -> Result<BlsWorkResult, WorkerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SubmitMsg { jobs, reply: reply_tx })
            .await
            .map_err(|_| WorkerError::RuntimeGone)?;
        reply_rx.await.map_err(|_| WorkerError::RuntimeGone)
    }

    fn cancel(&self) {
        self.cancellation.cancel();
    }
}
