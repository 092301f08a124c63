use crate::foundation::error::{FramecueError, FramecueResult};

pub use kurbo::{Point, Rect, Vec2};

/// Tolerance used when converting seconds to whole frames, so that `0.1 * 30` lands on frame 3
/// instead of being pushed to 4 by binary rounding noise.
const FRAME_SNAP_EPS: f64 = 1e-9;

/// Absolute frame index on the composition timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> FramecueResult<Self> {
        if start.0 > end.0 {
            return Err(FramecueError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate (`num / den` frames per second).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> FramecueResult<Self> {
        if den == 0 {
            return Err(FramecueError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FramecueError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Seconds to frames, rounding down. Negative or non-finite input yields 0.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        snap_frames(self.exact_frames(secs), f64::floor)
    }

    /// Seconds to frames, rounding up. Negative or non-finite input yields 0.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        snap_frames(self.exact_frames(secs), f64::ceil)
    }

    /// Seconds to frames, rounding to nearest. Negative or non-finite input yields 0.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        snap_frames(self.exact_frames(secs), f64::round)
    }

    fn exact_frames(self, secs: f64) -> f64 {
        secs * f64::from(self.num) / f64::from(self.den)
    }
}

fn snap_frames(frames: f64, op: fn(f64) -> f64) -> u64 {
    if !frames.is_finite() || frames <= 0.0 {
        return 0;
    }
    let nearest = frames.round();
    let v = if (frames - nearest).abs() < FRAME_SNAP_EPS {
        nearest
    } else {
        op(frames)
    };
    v.max(0.0) as u64
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
