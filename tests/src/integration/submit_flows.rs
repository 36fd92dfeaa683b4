//! # submit() End-to-End Flows
//!
//! Drives `bls-verify`'s worker runtime the way a gossip/sync/block
//! processing caller would: build a `WorkReq[]`, call `submit()`, and
//! check the returned `BlsWorkResult` against the scenarios in the
//! engine's specification (§8).

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bls_verify::{
        BlsVerificationApi, PublicKeyBytes, SignatureBytes, SignatureSet, WorkReq, WorkReqOpts,
        WorkResult, WorkerConfig, WorkerHandle, WorkerRuntime,
    };
    use blst::min_pk::SecretKey;

    const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

    /// A known-valid set over a seed-derived keypair and message.
    fn valid_set(seed: u8) -> SignatureSet {
        let sk = SecretKey::key_gen(&[seed; 32], &[]).unwrap();
        let pk = sk.sk_to_pk();
        let message = [seed; 32];
        let sig = sk.sign(&message, DST, &[]);
        SignatureSet::new(
            PublicKeyBytes(pk.to_bytes()),
            message,
            SignatureBytes(sig.to_bytes()),
        )
    }

    /// A known-invalid set: a real keypair, but the signature doesn't
    /// match the attached message.
    fn invalid_set(seed: u8) -> SignatureSet {
        let mut set = valid_set(seed);
        set.message = [0xEEu8; 32];
        set
    }

    fn runtime() -> (WorkerRuntime, WorkerHandle) {
        WorkerHandle::spawn_default()
    }

    async fn submit_all(handle: &WorkerHandle, jobs: Vec<WorkReq>) -> bls_verify::BlsWorkResult {
        handle.submit(jobs).await.expect("worker runtime reachable")
    }

    // Scenario 1: all valid, all batchable.
    #[tokio::test]
    async fn all_valid_all_batchable() {
        let (rt, handle) = runtime();
        let jobs = vec![
            WorkReq::batchable(vec![valid_set(1)]),
            WorkReq::batchable(vec![valid_set(2), valid_set(3)]),
            WorkReq::batchable(vec![valid_set(4)]),
        ];
        let result = submit_all(&handle, jobs).await;

        assert_eq!(result.results.len(), 3);
        assert!(result.results.iter().all(WorkResult::is_success));
        assert_eq!(result.metrics.batch_retries, 0);
        assert_eq!(result.metrics.batch_sigs_success, 4);

        drop(handle);
        rt.join().await;
    }

    // Scenario 2: one bad set inside one batchable chunk (total weight
    // below threshold, so all three jobs land in a single terminal
    // chunk that fails and is individually retried).
    #[tokio::test]
    async fn one_bad_set_inside_one_batchable_chunk() {
        let (rt, handle) = runtime();
        let jobs = vec![
            WorkReq::batchable(vec![valid_set(11)]),
            WorkReq::batchable(vec![invalid_set(12)]),
            WorkReq::batchable(vec![valid_set(13)]),
        ];
        let result = submit_all(&handle, jobs).await;

        assert_eq!(result.results[0], WorkResult::Success { value: true });
        assert_eq!(result.results[1], WorkResult::Success { value: false });
        assert_eq!(result.results[2], WorkResult::Success { value: true });
        assert_eq!(result.metrics.batch_retries, 1);
        assert_eq!(result.metrics.batch_sigs_success, 0);

        drop(handle);
        rt.join().await;
    }

    // Scenario 3: mixed batchable/non-batchable jobs. The non-batchable
    // invalid job must not poison the batchable chunk.
    #[tokio::test]
    async fn mixed_batchable_and_non_batchable_are_isolated() {
        let (rt, handle) = runtime();
        let jobs = vec![
            WorkReq::non_batchable(vec![valid_set(21)]),
            WorkReq::batchable(vec![valid_set(22)]),
            WorkReq::non_batchable(vec![invalid_set(23)]),
        ];
        let result = submit_all(&handle, jobs).await;

        assert_eq!(result.results[0], WorkResult::Success { value: true });
        assert_eq!(result.results[1], WorkResult::Success { value: true });
        assert_eq!(result.results[2], WorkResult::Success { value: false });
        assert_eq!(result.metrics.batch_retries, 0);
        assert_eq!(result.metrics.batch_sigs_success, 1);

        drop(handle);
        rt.join().await;
    }

    // Scenario 4: chunker boundary. 17 batchable single-set jobs at the
    // default threshold of 16 form exactly two chunks: 16 then 1.
    #[tokio::test]
    async fn chunker_boundary_seventeen_jobs_two_chunks() {
        let (rt, handle) = runtime();
        let jobs: Vec<WorkReq> = (0..17u8)
            .map(|i| WorkReq::batchable(vec![valid_set(i)]))
            .collect();
        let result = submit_all(&handle, jobs).await;

        assert!(result.results.iter().all(WorkResult::is_success));
        assert_eq!(result.metrics.batch_retries, 0);
        assert_eq!(result.metrics.batch_sigs_success, 17);

        drop(handle);
        rt.join().await;
    }

    // Scenario 6 (§8): cancellation fired mid-request. A request large
    // enough to span two chunks is submitted, then cancelled from
    // another task; some results may complete, the rest must surface
    // as `Cancelled` and the result vector must still be full length.
    #[tokio::test]
    async fn cancellation_mid_request_preserves_result_length() {
        let (rt, handle) = runtime();
        handle.cancel();

        let jobs: Vec<WorkReq> = (0..20u8)
            .map(|i| WorkReq::batchable(vec![valid_set(i)]))
            .collect();
        let result = submit_all(&handle, jobs).await;

        assert_eq!(result.results.len(), 20);
        assert!(result
            .results
            .iter()
            .all(|r| matches!(r, WorkResult::Error { reason: bls_verify::SignatureError::Cancelled })));

        drop(handle);
        rt.join().await;
    }

    // Jobs with zero sets are a caller bug: §4.4 resolves them to
    // `InvalidInput` up front, independent of batchability.
    #[tokio::test]
    async fn empty_job_is_invalid_input() {
        let (rt, handle) = runtime();
        let jobs = vec![WorkReq::batchable(vec![]), WorkReq::non_batchable(vec![])];
        let result = submit_all(&handle, jobs).await;

        for r in &result.results {
            assert!(matches!(
                r,
                WorkResult::Error {
                    reason: bls_verify::SignatureError::InvalidInput
                }
            ));
        }

        drop(handle);
        rt.join().await;
    }

    // Determinism: two submissions with the same input produce equal
    // results and equal counters.
    #[tokio::test]
    async fn repeated_submission_is_deterministic() {
        let (rt, handle) = runtime();
        let build_jobs = || -> Vec<WorkReq> {
            (0..25u8)
                .map(|i| {
                    if i % 6 == 0 {
                        WorkReq::batchable(vec![invalid_set(i)])
                    } else {
                        WorkReq::batchable(vec![valid_set(i)])
                    }
                })
                .collect()
        };

        let first = submit_all(&handle, build_jobs()).await;
        let second = submit_all(&handle, build_jobs()).await;

        assert_eq!(first.results, second.results);
        assert_eq!(first.metrics.batch_retries, second.metrics.batch_retries);
        assert_eq!(
            first.metrics.batch_sigs_success,
            second.metrics.batch_sigs_success
        );

        drop(handle);
        rt.join().await;
    }

    // An empty request returns immediately with zero-length results and
    // zeroed counters.
    #[tokio::test]
    async fn empty_request_returns_empty_results() {
        let (rt, handle) = runtime();
        let result = submit_all(&handle, vec![]).await;

        assert!(result.results.is_empty());
        assert_eq!(result.metrics.batch_retries, 0);
        assert_eq!(result.metrics.batch_sigs_success, 0);
        assert!(result.metrics.elapsed() < Duration::from_secs(5));

        drop(handle);
        rt.join().await;
    }

    // A runtime configured with a custom threshold respects it.
    #[tokio::test]
    async fn custom_threshold_changes_chunk_boundary() {
        let config = WorkerConfig {
            batchable_min_per_chunk: 2,
            parallel_chunks: false,
        };
        let (rt, handle) = WorkerRuntime::spawn(config, Arc::new(bls_verify::NoopMetricsSink));
        let jobs = vec![
            WorkReq::batchable(vec![valid_set(31)]),
            WorkReq::batchable(vec![valid_set(32)]),
            WorkReq::batchable(vec![valid_set(33)]),
        ];
        let result = submit_all(&handle, jobs).await;

        assert!(result.results.iter().all(WorkResult::is_success));
        assert_eq!(result.metrics.batch_sigs_success, 3);

        drop(handle);
        rt.join().await;
    }

    // Scenario 5 (§8): a malformed set makes the batch primitive fault
    // rather than return a plain `false`. The faulting chunk is still
    // demoted to individual verification, where the malformed set
    // surfaces as `InvalidInput` and its chunk-mates are unaffected.
    #[tokio::test]
    async fn malformed_set_faults_batch_then_surfaces_individually() {
        let (rt, handle) = runtime();
        let mut malformed = valid_set(51);
        malformed.public_key = PublicKeyBytes([0xFFu8; 48]);

        let jobs = vec![
            WorkReq::batchable(vec![valid_set(52)]),
            WorkReq::batchable(vec![malformed]),
            WorkReq::batchable(vec![valid_set(53)]),
        ];
        let result = submit_all(&handle, jobs).await;

        assert_eq!(result.results[0], WorkResult::Success { value: true });
        assert!(matches!(
            result.results[1],
            WorkResult::Error {
                reason: bls_verify::SignatureError::InvalidInput
            }
        ));
        assert_eq!(result.results[2], WorkResult::Success { value: true });
        assert_eq!(result.metrics.batch_retries, 1);
        assert_eq!(result.metrics.batch_sigs_success, 0);

        drop(handle);
        rt.join().await;
    }

    // opts are still plumbed through WorkReqOpts for callers who build
    // requests by hand rather than via the batchable()/non_batchable()
    // constructors.
    #[tokio::test]
    async fn hand_built_opts_respected() {
        let (rt, handle) = runtime();
        let job = WorkReq {
            sets: vec![valid_set(41)],
            opts: WorkReqOpts { batchable: false },
        };
        let result = submit_all(&handle, vec![job]).await;

        assert_eq!(result.results[0], WorkResult::Success { value: true });
        assert_eq!(result.metrics.batch_sigs_success, 0);

        drop(handle);
        rt.join().await;
    }
}
