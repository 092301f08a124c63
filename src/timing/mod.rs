//! Event timing: duration resolution, segment layout and active-segment lookup.

/// Active-segment resolution.
pub mod active;
/// Photo-board phase timing.
pub mod board;
/// Duration sources and resolvers.
pub mod resolve;
/// Seconds-to-frames segment layout.
pub mod segments;
/// Start-time distribution within a span.
pub mod spacing;
