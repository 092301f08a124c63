//! Camera follow for scrolling lists.

/// Spring-smoothed scroll camera.
pub mod scroll;
