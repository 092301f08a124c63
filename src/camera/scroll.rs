use crate::{
    animation::spring::{SpringConfig, SpringState},
    foundation::core::{Fps, FrameIndex},
    foundation::math::lerp,
    timing::segments::SegmentPlan,
};

/// How the scroll offset follows its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Spring progress measured from frame 0 of the render, blending the previous segment's
    /// target into the current one. Later transitions settle almost instantly.
    #[default]
    Memoryless,
    /// Spring progress measured from the start of the active segment.
    SegmentRelative,
    /// Spring integrated with carried velocity from frame 0. Replays start from the nearest
    /// checkpoint when [`ScrollCamera::with_checkpoints`] was called for the plan.
    Integrated,
}

/// Scroll geometry and smoothing mode.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Content offset of the first item.
    pub initial_offset: f64,
    /// Distance between consecutive item anchors.
    pub item_spacing: f64,
    /// Size of one item along the scroll axis.
    pub item_extent: f64,
    /// Visible extent along the scroll axis.
    pub viewport_extent: f64,
    /// Total content extent. Derived from the item count when absent.
    pub content_extent: Option<f64>,
    /// Smoothing mode.
    pub mode: CameraMode,
    /// Integration sub-steps per frame for [`CameraMode::Integrated`].
    pub substeps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_offset: 0.0,
            item_spacing: 240.0,
            item_extent: 200.0,
            viewport_extent: 1080.0,
            content_extent: None,
            mode: CameraMode::Memoryless,
            substeps: 4,
        }
    }
}

/// Camera output for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    /// Unsmoothed offset that centers the active item.
    pub target_scroll: f64,
    /// Offset actually applied, in `[0, max_scroll]`.
    pub smoothed_scroll: f64,
    /// Largest valid offset.
    pub max_scroll: f64,
}

/// Scroll controller for a list of `item_count` items, one per segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollCamera {
    config: CameraConfig,
    spring: SpringConfig,
    item_count: usize,
    checkpoints: Option<Checkpoints>,
}

/// Integrated spring states at segment starts, valid only for the plan and rate they were
/// computed with.
#[derive(Clone, Debug, PartialEq)]
struct Checkpoints {
    fps: Fps,
    plan: SegmentPlan,
    states: Vec<(u64, SpringState)>,
}

impl ScrollCamera {
    /// Controller for `item_count` items.
    pub fn new(config: CameraConfig, spring: SpringConfig, item_count: usize) -> Self {
        Self {
            config,
            spring,
            item_count,
            checkpoints: None,
        }
    }

    /// Precompute the [`CameraMode::Integrated`] spring state at every segment start of `plan`.
    ///
    /// Later [`ScrollCamera::state_at`] calls with the same plan and `fps` integrate only from the
    /// start of the active segment instead of from frame 0. Results are identical either way.
    /// Other modes keep no checkpoints.
    pub fn with_checkpoints(mut self, plan: &SegmentPlan, fps: Fps) -> Self {
        self.checkpoints = None;
        if self.config.mode != CameraMode::Integrated {
            return self;
        }
        let mut frame = 0;
        let mut state = self.initial_state(plan);
        let mut states = Vec::with_capacity(plan.len());
        for seg in plan.segments() {
            if seg.start_frame <= frame {
                continue;
            }
            state = self.replay(state, frame, seg.start_frame, plan, fps);
            frame = seg.start_frame;
            states.push((frame, state));
        }
        tracing::debug!(checkpoints = states.len(), "camera checkpoints ready");
        self.checkpoints = Some(Checkpoints {
            fps,
            plan: plan.clone(),
            states,
        });
        self
    }

    /// Geometry and mode in use.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// `max(0, content - viewport)`.
    pub fn max_scroll(&self) -> f64 {
        let c = &self.config;
        let content = c
            .content_extent
            .unwrap_or(c.initial_offset + self.item_count as f64 * c.item_spacing);
        let max = content - c.viewport_extent;
        if max.is_finite() { max.max(0.0) } else { 0.0 }
    }

    /// Offset that centers item `index` in the viewport, clamped to the valid range.
    pub fn target_for(&self, index: usize) -> f64 {
        let c = &self.config;
        let anchor = c.initial_offset + index as f64 * c.item_spacing + c.item_extent / 2.0;
        self.clamp(anchor - c.viewport_extent / 2.0)
    }

    /// Camera state at `frame`.
    pub fn state_at(&self, frame: FrameIndex, plan: &SegmentPlan, fps: Fps) -> CameraState {
        let max_scroll = self.max_scroll();
        let Some(active) = plan.active_index(frame) else {
            return CameraState {
                max_scroll,
                ..CameraState::default()
            };
        };
        let target_scroll = self.target_for(active);

        let smoothed = match self.config.mode {
            CameraMode::Memoryless => {
                let from = self.target_for(active.saturating_sub(1));
                let p = self.spring.progress_at_frame(frame.0, fps);
                lerp(from, target_scroll, p)
            }
            CameraMode::SegmentRelative => {
                let from = self.target_for(active.saturating_sub(1));
                let p = self
                    .spring
                    .progress_at_frame(plan.local_frame(frame, active), fps);
                lerp(from, target_scroll, p)
            }
            CameraMode::Integrated => self.integrate_to(frame, plan, fps),
        };

        CameraState {
            target_scroll,
            smoothed_scroll: self.clamp(smoothed),
            max_scroll,
        }
    }

    fn integrate_to(&self, frame: FrameIndex, plan: &SegmentPlan, fps: Fps) -> f64 {
        let checkpoint = self
            .checkpoints
            .as_ref()
            .filter(|c| c.fps == fps && c.plan == *plan)
            .and_then(|c| {
                let after = c.states.partition_point(|(f, _)| *f <= frame.0);
                after.checked_sub(1).and_then(|i| c.states.get(i)).copied()
            });
        let (from, state) = checkpoint.unwrap_or((0, self.initial_state(plan)));
        self.replay(state, from, frame.0, plan, fps).position
    }

    fn initial_state(&self, plan: &SegmentPlan) -> SpringState {
        SpringState::at_rest(self.target_for(plan.active_index(FrameIndex(0)).unwrap_or(0)))
    }

    /// Advance `state` from frame `from` to frame `to`, retargeting on every frame.
    fn replay(
        &self,
        mut state: SpringState,
        from: u64,
        to: u64,
        plan: &SegmentPlan,
        fps: Fps,
    ) -> SpringState {
        let first = plan.active_index(FrameIndex(0)).unwrap_or(0);
        let substeps = self.config.substeps.max(1);
        let dt = fps.frame_duration_secs() / f64::from(substeps);
        for f in from.saturating_add(1)..=to {
            let idx = plan.active_index(FrameIndex(f)).unwrap_or(first);
            let target = self.target_for(idx);
            for _ in 0..substeps {
                state.step(&self.spring, target, dt);
            }
        }
        state
    }

    fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return 0.0;
        }
        v.clamp(0.0, self.max_scroll())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/scroll.rs"]
mod tests;
