//! Concrete implementations of the outbound ports, wiring domain logic
//! to real infrastructure (here: Prometheus metrics via `bls-telemetry`).

pub mod metrics;
