//! # BLS Batch Verification Engine
//!
//! Discharges the bursty stream of BLS12-381 aggregate signature
//! verifications produced by gossip, sync, and block-processing
//! subsystems of a consensus-layer node.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): pure verification logic, no I/O
//! - **Ports Layer** (`ports/`): trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): the worker runtime wiring domain logic to ports
//! - **Adapters** (`adapters/`): concrete outbound port implementations (Prometheus metrics)
//!
//! ## What this crate does *not* do
//!
//! It does not manage key material, does not aggregate public keys into
//! signature sets (callers pre-aggregate same-message sets), does not
//! schedule across multiple machines, and persists nothing. Callers are
//! expected to run one [`WorkerRuntime`] per CPU-bound worker they want;
//! this crate provides no cross-worker coordination.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::metrics::PrometheusMetricsSink;
pub use config::WorkerConfig;
pub use domain::batch_verifier::{BatchVerifier, BatchVerifierConfig};
pub use domain::entities::{
    BatchMetrics, BlsWorkResult, MessageDigest, PublicKeyBytes, SignatureBytes, SignatureSet,
    WorkReq, WorkReqOpts, WorkResult,
};
pub use domain::errors::{ConfigError, SignatureError, WorkerError};
pub use domain::primitive::{verify_many, verify_set};
pub use ports::inbound::BlsVerificationApi;
pub use ports::outbound::{Clock, MetricsSink, NoopMetricsSink, SystemClock};
pub use service::{CancellationFlag, WorkerHandle, WorkerRuntime};
