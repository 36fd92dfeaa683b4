//! # Batch Verifier
//!
//! The batch-try-then-demote-to-individual state machine: chunk the
//! batchable jobs, attempt one randomized batch verification per chunk,
//! and fall back to per-job verification for anything a chunk couldn't
//! settle outright (a failed chunk, or a job that was never batchable).

use rayon::prelude::*;

use crate::ports::outbound::{Clock, MetricsSink};

use super::chunker::{Chunk, Chunker};
use super::entities::{BatchMetrics, BlsWorkResult, SignatureSet, WorkReq, WorkResult};
use super::errors::SignatureError;
use super::primitive::verify_many;
use super::router::JobRouter;

/// Tunables for one [`BatchVerifier::run`] call.
#[derive(Clone, Copy, Debug)]
pub struct BatchVerifierConfig {
    pub batchable_min_per_chunk: usize,
    /// Verify independent chunks concurrently with `rayon`. Disabled by
    /// default: the engine's concurrency model is one cooperative
    /// single-threaded worker per CPU core, and cross-chunk parallelism
    /// inside a single worker is an opt-in tunable for callers willing
    /// to trade that isolation for lower chunk-verification latency.
    pub parallel_chunks: bool,
}

impl Default for BatchVerifierConfig {
    fn default() -> Self {
        Self {
            batchable_min_per_chunk: super::chunker::BATCHABLE_MIN_PER_CHUNK,
            parallel_chunks: false,
        }
    }
}

/// Outcome of attempting to verify one chunk as a single randomized
/// batch. Sequential and parallel chunk-processing both reduce to this
/// type so the assembly step downstream is identical either way.
enum ChunkVerifyResult {
    /// The batch call completed; `true` iff every set in the chunk
    /// verified.
    Verified(bool),
    /// The batch call itself could not be performed (malformed input
    /// surfaced at the primitive level).
    Faulted(SignatureError),
    /// Cancellation fired before this chunk was attempted.
    Cancelled,
}

pub struct BatchVerifier;

impl BatchVerifier {
    /// Run the full batch-then-individual pipeline over `jobs`.
    ///
    /// `is_cancelled` is polled between suspension points (before each
    /// chunk, before each individual job); `clock` supplies
    /// `worker_start`/`worker_end` timestamps; `metrics` receives
    /// per-event notifications as the run progresses.
    pub fn run(
        jobs: &[WorkReq],
        config: BatchVerifierConfig,
        is_cancelled: &dyn Fn() -> bool,
        clock: &dyn Clock,
        metrics: &dyn MetricsSink,
    ) -> BlsWorkResult {
        let worker_start = clock.now();
        let mut results: Vec<Option<WorkResult>> = vec![None; jobs.len()];
        let mut batch_metrics = BatchMetrics::zero(worker_start);

        // Jobs with no sets are invalid regardless of batchability or
        // cancellation state; resolve them up front and exclude them
        // from routing entirely.
        let mut routable: Vec<usize> = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            if job.sets.is_empty() {
                results[index] = Some(WorkResult::Error {
                    reason: SignatureError::InvalidInput,
                });
            } else {
                routable.push(index);
            }
        }

        let (batchable, non_batchable) = JobRouter::split_indices(&routable, jobs);

        let chunker = Chunker::new(config.batchable_min_per_chunk)
            .unwrap_or_else(|_| Chunker::default());
        let chunks = chunker.chunk(batchable.iter().map(|&i| (i, jobs[i].weight())));

        let chunk_outcomes: Vec<(Chunk, ChunkVerifyResult)> = if config.parallel_chunks {
            // Coarse cancellation check: either we run the whole batch
            // of chunks or none of them. Once dispatched, individual
            // chunks are not interrupted mid-flight.
            if is_cancelled() {
                chunks
                    .into_iter()
                    .map(|c| (c, ChunkVerifyResult::Cancelled))
                    .collect()
            } else {
                chunks
                    .into_par_iter()
                    .map(|c| {
                        let outcome = verify_chunk(&c, jobs);
                        (c, outcome)
                    })
                    .collect()
            }
        } else {
            chunks
                .into_iter()
                .map(|c| {
                    let outcome = if is_cancelled() {
                        ChunkVerifyResult::Cancelled
                    } else {
                        verify_chunk(&c, jobs)
                    };
                    (c, outcome)
                })
                .collect()
        };

        // Individual fallback queue: chunk failures first (in the order
        // their chunks were assembled), then jobs that were never
        // batchable, in original order.
        let mut individual_queue: Vec<usize> = Vec::new();

        for (chunk, outcome) in chunk_outcomes {
            match outcome {
                ChunkVerifyResult::Verified(true) => {
                    batch_metrics.batch_sigs_success += chunk.weight as u64;
                    metrics.record_batch_success(chunk.weight);
                    for index in chunk.job_indices {
                        results[index] = Some(WorkResult::Success { value: true });
                    }
                }
                ChunkVerifyResult::Verified(false) | ChunkVerifyResult::Faulted(_) => {
                    batch_metrics.batch_retries += 1;
                    metrics.record_batch_retry(chunk.weight);
                    individual_queue.extend(chunk.job_indices);
                }
                ChunkVerifyResult::Cancelled => {
                    for index in chunk.job_indices {
                        results[index] = Some(WorkResult::Error {
                            reason: SignatureError::Cancelled,
                        });
                    }
                }
            }
        }

        individual_queue.extend(non_batchable);

        for index in individual_queue {
            if is_cancelled() {
                results[index] = Some(WorkResult::Error {
                    reason: SignatureError::Cancelled,
                });
                metrics.record_cancelled();
                continue;
            }
            let outcome = match verify_many(&jobs[index].sets) {
                Ok(value) => {
                    metrics.record_individual_verify(value);
                    WorkResult::Success { value }
                }
                Err(e) => {
                    metrics.record_individual_verify(false);
                    WorkResult::Error { reason: e.into() }
                }
            };
            results[index] = Some(outcome);
        }

        let worker_end = clock.now();
        batch_metrics.worker_end = worker_end;
        metrics.record_request(jobs.len(), batch_metrics.elapsed());

        let results = results
            .into_iter()
            .map(|r| {
                r.unwrap_or(WorkResult::Error {
                    reason: SignatureError::InternalError(
                        "job index never received a verdict".into(),
                    ),
                })
            })
            .collect();

        BlsWorkResult {
            results,
            metrics: batch_metrics,
        }
    }
}

fn verify_chunk(chunk: &Chunk, jobs: &[WorkReq]) -> ChunkVerifyResult {
    let sets: Vec<SignatureSet> = chunk
        .job_indices
        .iter()
        .flat_map(|&i| jobs[i].sets.clone())
        .collect();
    match verify_many(&sets) {
        Ok(value) => ChunkVerifyResult::Verified(value),
        Err(e) => ChunkVerifyResult::Faulted(e.into()),
    }
}
