//! # Errors
//!
//! Error taxonomy for batch signature verification.

use thiserror::Error;

/// Errors surfaced per-job via `WorkResult::Error`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// A set was malformed (bad point encoding, wrong length, point not
    /// in the expected subgroup). Emitted per-job after falling back to
    /// individual verification.
    #[error("invalid signature set (malformed public key, signature, or encoding)")]
    InvalidInput,

    /// The BLS library raised an internal error during individual
    /// verification that isn't accounted for by malformed input. Reported
    /// per-job; does not abort the request.
    #[error("BLS primitive fault: {0}")]
    PrimitiveFault(String),

    /// The worker's cancellation signal fired before this job was
    /// verified.
    #[error("verification cancelled")]
    Cancelled,

    /// A worker-runtime-level panic occurred; every index in the request
    /// receives this same error kind.
    #[error("internal worker error: {0}")]
    InternalError(String),
}

/// Errors from the underlying BLS primitive (`verify_set` / `verify_many`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("empty input to batch primitive")]
    EmptyInput,

    #[error("malformed point or scalar encoding")]
    Malformed,

    #[error("unexpected primitive fault: {0}")]
    Other(String),
}

impl From<PrimitiveError> for SignatureError {
    fn from(e: PrimitiveError) -> Self {
        match e {
            PrimitiveError::EmptyInput | PrimitiveError::Malformed => SignatureError::InvalidInput,
            PrimitiveError::Other(msg) => SignatureError::PrimitiveFault(msg),
        }
    }
}

/// Errors constructing or reconfiguring the engine (tunables out of range,
/// etc.). Never surfaced through `WorkResult`; these are construction-time
/// failures the caller must handle before submitting work.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batchable_min_per_chunk must be in [1, 1024], got {0}")]
    ChunkThresholdOutOfRange(usize),
}

/// Errors reaching the [`crate::service::WorkerRuntime`] from a
/// [`crate::service::WorkerHandle`]: transport failures, not verification
/// failures.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker runtime is no longer running")]
    RuntimeGone,
}
