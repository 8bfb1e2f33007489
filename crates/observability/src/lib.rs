//! `marketlens-observability` — tracing/logging setup for embedders.
//!
//! The analytic crates emit structured `tracing` events (per-level counts in
//! the miner, skip counters, anomaly scan stats); this crate wires a
//! subscriber for hosts that do not bring their own.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
