//! Overlay effects attached to events.
//!
//! Effects are declared per event, parsed once, and scheduled so that an effect repeated on
//! consecutive events plays as a single instance.

/// Effect declarations and parsed kinds.
pub mod model;
/// Instance registry and per-frame effect states.
pub mod scheduler;
/// Kind-specific drawing parameters.
pub mod visual;
