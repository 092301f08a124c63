//! Shared primitives: frame/time types, errors, diagnostics and deterministic math.

/// Frame, rate and canvas types.
pub mod core;
/// Recovered, non-fatal problems.
pub mod diag;
/// Error type and result alias.
pub mod error;
/// Interpolation helpers and stable hashing.
pub mod math;
/// Deterministic PRNG.
pub mod rng;
