//! # Inbound Ports
//!
//! The trait callers (gossip validation, sync, block processing) code
//! against. [`crate::service::WorkerHandle`] is the concrete
//! implementation.

use async_trait::async_trait;

use crate::domain::entities::{BlsWorkResult, WorkReq};
use crate::domain::errors::WorkerError;

/// Submit a batch of verification jobs and await their results.
///
/// Implementations preserve request-order: `result.results[i]`
/// corresponds to `jobs[i]`.
#[async_trait]
pub trait BlsVerificationApi: Send + Sync {
    async fn submit(&self, jobs: Vec<WorkReq>) -> Result<BlsWorkResult, WorkerError>;

    /// Request cancellation of whatever request is currently in
    /// flight. Has no effect if nothing is running. Cancellation is
    /// cooperative: jobs already past their check point still
    /// complete.
    fn cancel(&self);
}
