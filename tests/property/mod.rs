//! Property-based tests.
//!
//! Random capacities, request counts, and hold durations; the invariants
//! must hold on every combination.

pub mod pool;
