//! Lightweight in-process metrics.
//!
//! Breaker states are rendered straight from the report on each scrape;
//! gateway-local counters are stored as atomics.

pub mod metrics;

pub use metrics::{CounterVec, GatewayMetrics};
