use crate::{
    animation::ease::Ease,
    foundation::core::FrameIndex,
    foundation::math::clamp01,
    ranking::model::DataFrame,
    timing::segments::SegmentPlan,
};

/// Which pair of data frames is on screen and how far the transition between them has run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RaceStep {
    /// Index of the frame being left.
    pub from: usize,
    /// Index of the frame being approached (the active segment).
    pub to: usize,
    /// Linear transition progress in `[0, 1]`.
    pub linear: f64,
    /// `linear` after the event's easing.
    pub eased: f64,
}

/// Data frames of a race, one per segment, with the easing each transition uses.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceTimeline {
    frames: Vec<DataFrame>,
    eases: Vec<Ease>,
    animation_frames: u64,
}

impl RaceTimeline {
    /// Timeline whose transition into frame `i` uses `eases[i]` (or `Ease::Linear` when missing)
    /// and lasts `animation_frames`, capped by the segment length.
    pub fn new(frames: Vec<DataFrame>, eases: Vec<Ease>, animation_frames: u64) -> Self {
        Self {
            frames,
            eases,
            animation_frames,
        }
    }

    /// All data frames.
    pub fn frames(&self) -> &[DataFrame] {
        &self.frames
    }

    /// Data frame at `index`.
    pub fn frame(&self, index: usize) -> Option<&DataFrame> {
        self.frames.get(index)
    }

    /// Transition state at `frame`. `None` when the plan is empty.
    ///
    /// The first segment has nothing to transition from and reports full progress, as do
    /// zero-length segments.
    pub fn step_at(&self, plan: &SegmentPlan, frame: FrameIndex) -> Option<RaceStep> {
        let to = plan.active_index(frame)?;
        let from = to.saturating_sub(1);
        let seg = plan.get(to)?;
        let linear = if to == 0 || seg.duration_frames == 0 {
            1.0
        } else {
            let window = self.animation_frames.min(seg.duration_frames).max(1);
            clamp01(plan.local_frame(frame, to) as f64 / window as f64)
        };
        let ease = self.eases.get(to).copied().unwrap_or(Ease::Linear);
        Some(RaceStep {
            from,
            to,
            linear,
            eased: ease.apply(linear),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ranking/timeline.rs"]
mod tests;
