//! Frame evaluation.

/// Preparation and single-frame evaluation.
pub mod evaluator;
/// Range evaluation, optionally parallel.
pub mod range;
