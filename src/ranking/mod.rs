//! Bar-chart-race data, scales and interpolation.
//!
//! A race is a sequence of [`model::DataFrame`]s, one per segment. Between two frames every bar
//! slides from its old slot to its new one while its length and label tween.

/// Compact value labels and ordinals.
pub mod format;
/// Per-frame bar interpolation.
pub mod interp;
/// Data items, colors and ranking.
pub mod model;
/// Linear and band scales.
pub mod scale;
/// Mapping of timeline frames to race transitions.
pub mod timeline;
