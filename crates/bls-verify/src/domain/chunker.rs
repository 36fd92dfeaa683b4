//! # Chunker
//!
//! Greedily groups batchable jobs into chunks of roughly equal weight
//! (total signature-set count), so each chunk is large enough to be
//! worth a randomized batch-verification call.

use super::errors::ConfigError;

/// Default minimum weight a chunk should carry before the chunker closes
/// it and starts a new one. The final chunk of a request may fall short
/// of this if there isn't enough work left to fill it.
pub const BATCHABLE_MIN_PER_CHUNK: usize = 16;

/// Lower/upper bounds accepted for a configured `batchable_min_per_chunk`.
const MIN_THRESHOLD: usize = 1;
const MAX_THRESHOLD: usize = 1024;

/// One group of job indices to be verified together in a single batch
/// call. `job_indices` preserves the original submission order of the
/// jobs assigned to this chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub job_indices: Vec<usize>,
    pub weight: usize,
}

/// Greedy, deterministic job chunker.
///
/// Construct with [`Chunker::new`], which validates the threshold once;
/// every [`Chunker::chunk`] call afterward is infallible.
#[derive(Clone, Copy, Debug)]
pub struct Chunker {
    min_per_chunk: usize,
}

impl Chunker {
    pub fn new(min_per_chunk: usize) -> Result<Self, ConfigError> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&min_per_chunk) {
            return Err(ConfigError::ChunkThresholdOutOfRange(min_per_chunk));
        }
        Ok(Self { min_per_chunk })
    }

    /// Greedily accumulate `(job_index, weight)` pairs into chunks: keep
    /// adding jobs to the current chunk until its total weight reaches
    /// `min_per_chunk`, then close it and start a new one. The last
    /// chunk may be undersized if there isn't enough work left.
    ///
    /// A single job whose own weight meets or exceeds `min_per_chunk`
    /// occupies a chunk by itself. Input order is preserved: job indices
    /// appear in chunks in the same relative order they were given.
    pub fn chunk(&self, weights: impl IntoIterator<Item = (usize, usize)>) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = Chunk {
            job_indices: Vec::new(),
            weight: 0,
        };

        for (job_index, weight) in weights {
            current.job_indices.push(job_index);
            current.weight += weight;
            if current.weight >= self.min_per_chunk {
                chunks.push(std::mem::replace(
                    &mut current,
                    Chunk {
                        job_indices: Vec::new(),
                        weight: 0,
                    },
                ));
            }
        }

        if !current.job_indices.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(BATCHABLE_MIN_PER_CHUNK).expect("default threshold is always in range")
    }
}
