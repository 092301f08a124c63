//! Easing curves and spring smoothing.

/// Named easing functions.
pub mod ease;
/// Damped springs (closed form and integrated).
pub mod spring;
