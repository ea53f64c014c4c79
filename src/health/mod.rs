// src/health/mod.rs
// =============================================================================
// This module finds out which of a page's links are unreachable.
//
// Submodules:
// - probe: the single-link reachability check (HTTP HEAD)
// - checker: the concurrent fan-out/fan-in over all links
// =============================================================================

mod checker;
mod probe;

pub use checker::{HealthChecker, HealthReport};
pub use probe::HttpProber;

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Prober trait?
//    - The checker only needs "is this link reachable?"
//    - Tests drive the checker with fakes that control latency and outcome,
//      so timeouts and cancellation can be tested on a paused clock
//
// 2. Why spawn tasks instead of buffer_unordered?
//    - Spawned tasks can be aborted as a group (JoinSet::shutdown), which
//      is what cancellation needs
//    - A Semaphore gives the same concurrency ceiling buffer_unordered(N)
//      would, while still keeping one task per link
// -----------------------------------------------------------------------------
