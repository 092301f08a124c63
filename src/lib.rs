//! Framecue computes, for any frame of a data-visualization video, exactly what should be on
//! screen.
//!
//! Everything is a pure function of the composition and the frame index:
//!
//! - Load and validate a [`Composition`] (JSON or [`CompositionBuilder`])
//! - Resolve event durations and build plans with [`PreparedComposition::prepare`]
//! - Evaluate single frames with [`Evaluator::eval_frame`] or ranges with [`eval_range`]
//!
//! Frames can be evaluated in any order and on any thread; the result for a given frame never
//! depends on which frames were evaluated before it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Easing curves and springs.
pub mod animation;
/// Narration audio.
pub mod audio;
/// Camera follow.
pub mod camera;
/// Composition model and builders.
pub mod composition;
/// Overlay effects.
pub mod effects;
/// Frame evaluation.
pub mod eval;
/// Shared primitives.
pub mod foundation;
/// Bar-chart-race interpolation.
pub mod ranking;
/// Event timing.
pub mod timing;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2};
pub use crate::foundation::diag::{Diagnostic, DiagnosticKind};
pub use crate::foundation::error::{FramecueError, FramecueResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::spring::{SpringConfig, SpringState};
pub use crate::audio::amplitude::{AmplitudeSmoothing, AudioPcm, frame_rms, smoothed_amplitude};
pub use crate::camera::scroll::{CameraConfig, CameraMode, CameraState, ScrollCamera};
pub use crate::composition::builder::{CompositionBuilder, EventBuilder};
pub use crate::composition::model::{Composition, EventDef, RenderConfig};
pub use crate::effects::model::{EffectDef, EffectKind, parse_effect};
pub use crate::effects::scheduler::{
    EffectFades, EffectPhase, EffectRegistry, EffectScheduler, EffectState, InstanceId,
};
pub use crate::effects::visual::EffectVisual;
pub use crate::eval::evaluator::{Evaluator, FrameState, PreparedComposition};
pub use crate::eval::range::{EvalThreading, eval_range, eval_range_with};
pub use crate::ranking::format::CompactFormat;
pub use crate::ranking::interp::{
    AxisTick, BarPhase, BarState, RaceFrame, RaceLayout, RaceParams, RankLabelPolicy,
    interpolate_race,
};
pub use crate::ranking::model::{Color, DataFrame, Datum, RankDirection};
pub use crate::ranking::timeline::{RaceStep, RaceTimeline};
pub use crate::timing::active::resolve_active_segment;
pub use crate::timing::board::{BoardPhase, BoardPhaseState, BoardPlan, BoardTiming};
pub use crate::timing::resolve::{
    DurationResolver, DurationSource, FfprobeDurationResolver, StaticDurations,
    resolve_event_durations,
};
pub use crate::timing::segments::{Segment, SegmentPlan, SegmentTiming};
pub use crate::timing::spacing::{Spacing, distribute_event_start_times};
