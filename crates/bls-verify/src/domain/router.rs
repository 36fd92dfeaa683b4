//! # Job Router
//!
//! Splits an incoming request into batchable and non-batchable job
//! indices, preserving each group's original relative order so that
//! downstream result assembly can map back onto the caller's indices.

use super::entities::WorkReq;

/// Stateless router: partitions job indices by the `batchable` flag on
/// each job's options. Jobs with zero sets are the caller's concern
/// (handled upstream, before routing); the router only looks at
/// `opts.batchable`.
pub struct JobRouter;

impl JobRouter {
    /// Partition an arbitrary subset of job indices (already filtered
    /// by the caller, e.g. to exclude jobs with no sets) by their
    /// `batchable` flag, without cloning any job.
    pub fn split_indices(candidate_indices: &[usize], jobs: &[WorkReq]) -> (Vec<usize>, Vec<usize>) {
        let mut batchable = Vec::new();
        let mut non_batchable = Vec::new();
        for &index in candidate_indices {
            if jobs[index].opts.batchable {
                batchable.push(index);
            } else {
                non_batchable.push(index);
            }
        }
        (batchable, non_batchable)
    }
}
