//! # Domain Entities
//!
//! Core data structures for batch signature verification.

use std::time::{Duration, Instant};

use super::errors::SignatureError;

/// A BLS12-381 public key, G1-compressed (48 bytes). Under the `min_pk`
/// convention used by Ethereum consensus, signatures live on G2 and public
/// keys on G1.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PublicKeyBytes(pub [u8; 48]);

/// A BLS12-381 signature, G2-compressed (96 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SignatureBytes(pub [u8; 96]);

/// A 32-byte message digest, already domain-separated by the caller.
pub type MessageDigest = [u8; 32];

/// One atomic verification unit: an aggregate public key, the message it
/// signs, and the signature over that message.
///
/// Invariant: all three fields are non-empty by construction (the byte
/// arrays are fixed-size). Messages across sets within one batch SHOULD be
/// distinct; the caller is expected to pre-aggregate same-message sets
/// before submission.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SignatureSet {
    pub public_key: PublicKeyBytes,
    pub message: MessageDigest,
    pub signature: SignatureBytes,
}

impl SignatureSet {
    pub fn new(public_key: PublicKeyBytes, message: MessageDigest, signature: SignatureBytes) -> Self {
        Self {
            public_key,
            message,
            signature,
        }
    }
}

/// Caller-supplied options accompanying a [`WorkReq`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WorkReqOpts {
    /// Caller assertion that this job's sets may be interleaved with other
    /// jobs' sets inside a single randomized batch-verification call.
    pub batchable: bool,
}

/// A caller-submitted verification job. A job is valid iff every set in it
/// verifies; there is no partial semantics.
#[derive(Clone, Debug)]
pub struct WorkReq {
    pub sets: Vec<SignatureSet>,
    pub opts: WorkReqOpts,
}

impl WorkReq {
    /// Construct a job the caller asserts is safe to batch with others.
    pub fn batchable(sets: Vec<SignatureSet>) -> Self {
        Self {
            sets,
            opts: WorkReqOpts { batchable: true },
        }
    }

    /// Construct a job that must always be verified on its own.
    pub fn non_batchable(sets: Vec<SignatureSet>) -> Self {
        Self {
            sets,
            opts: WorkReqOpts { batchable: false },
        }
    }

    pub fn weight(&self) -> usize {
        self.sets.len()
    }
}

/// The per-job outcome of a [`WorkReq`].
///
/// A cryptographically invalid signature is not an error. It is
/// `Success { value: false }`. This preserves the distinction between "we
/// verified, the answer is no" and "we could not verify".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkResult {
    /// Verification completed. `value` is true iff every set in the job
    /// verified.
    Success { value: bool },
    /// Verification could not be performed.
    Error { reason: SignatureError },
}

impl WorkResult {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkResult::Success { value: true })
    }
}

/// Per-request counters and timestamps, opaque to the engine beyond what
/// it populates here. Mirrors exactly what the batch verifier observed
/// about its own run, nothing more.
#[derive(Clone, Copy, Debug)]
pub struct BatchMetrics {
    /// Number of chunks whose batch verification failed (and were
    /// demoted to individual verification) during this request.
    pub batch_retries: u64,
    /// Number of sets admitted via a successful batch during this
    /// request. Never incremented for a chunk that failed and was
    /// individually retried, even if some of its jobs later verify.
    pub batch_sigs_success: u64,
    pub worker_start: Instant,
    pub worker_end: Instant,
}

impl BatchMetrics {
    pub fn zero(now: Instant) -> Self {
        Self {
            batch_retries: 0,
            batch_sigs_success: 0,
            worker_start: now,
            worker_end: now,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.worker_end.saturating_duration_since(self.worker_start)
    }
}

/// Per-request outcome returned by [`crate::ports::inbound::BlsVerificationApi::submit`].
#[derive(Clone, Debug)]
pub struct BlsWorkResult {
    /// Indexed identically to the incoming `WorkReq[]`.
    pub results: Vec<WorkResult>,
    pub metrics: BatchMetrics,
}
