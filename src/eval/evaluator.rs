use crate::{
    animation::ease::Ease,
    audio::amplitude::{AudioPcm, smoothed_amplitude},
    camera::scroll::{CameraState, ScrollCamera},
    composition::model::Composition,
    effects::scheduler::{EffectFades, EffectScheduler, EffectState, InstanceId},
    foundation::core::{FrameIndex, Rect},
    foundation::diag::{Diagnostic, DiagnosticKind},
    foundation::error::FramecueResult,
    ranking::format::CompactFormat,
    ranking::interp::{AxisTick, BarState, RaceFrame, RaceParams, interpolate_race},
    ranking::model::DataFrame,
    ranking::timeline::{RaceStep, RaceTimeline},
    timing::board::{BoardPhaseState, BoardPlan, build_board_plan},
    timing::resolve::{DurationResolver, resolve_event_durations},
    timing::segments::{SegmentPlan, SegmentTiming},
};

#[derive(Clone, Debug)]
/// A validated composition with durations resolved and every schedule precomputed.
///
/// Preparing is the only fallible step; evaluating frames afterwards never fails.
pub struct PreparedComposition {
    comp: Composition,
    durations_secs: Vec<f64>,
    plan: SegmentPlan,
    board: Option<BoardPlan>,
    race: RaceTimeline,
    race_params: RaceParams,
    format: CompactFormat,
    camera: ScrollCamera,
    effects: EffectScheduler,
    audio: Option<AudioPcm>,
    diagnostics: Vec<Diagnostic>,
}

impl PreparedComposition {
    /// Validate `comp`, resolve its event durations through `resolver` and build the plans.
    ///
    /// Recovered problems (duration fallbacks, unknown easings or effects) are collected in
    /// [`PreparedComposition::diagnostics`].
    #[tracing::instrument(skip(comp, resolver), fields(events = comp.events.len()))]
    pub fn prepare(comp: Composition, resolver: &dyn DurationResolver) -> FramecueResult<Self> {
        comp.validate()?;
        let cfg = &comp.config;
        let mut diagnostics = Vec::new();

        let sources: Vec<_> = comp.events.iter().map(|e| e.duration.clone()).collect();
        let resolved = resolve_event_durations(&sources, resolver, cfg.fallback_duration_secs);
        diagnostics.extend(resolved.diagnostics);

        let (plan, board) = match comp.board {
            Some(timing) => {
                let board = build_board_plan(
                    &resolved.secs,
                    comp.fps,
                    timing,
                    cfg.fallback_duration_secs,
                );
                (board.plan.clone(), Some(board))
            }
            None => {
                let timing = SegmentTiming {
                    fps: comp.fps,
                    gap_frames: cfg.gap_between_segments_frames,
                    fallback_secs: cfg.fallback_duration_secs,
                };
                (SegmentPlan::build(&resolved.secs, &timing), None)
            }
        };

        let default_ease = resolve_ease(&cfg.default_easing, Ease::Linear, &mut diagnostics);
        let base_ease = resolve_ease(&cfg.easing, default_ease, &mut diagnostics);
        let eases = comp
            .events
            .iter()
            .map(|e| match &e.easing {
                Some(name) => resolve_ease(name, base_ease, &mut diagnostics),
                None => base_ease,
            })
            .collect();
        let frames = comp
            .events
            .iter()
            .map(|e| DataFrame {
                key: e.key.clone(),
                data: e.data.clone(),
            })
            .collect();
        let race = RaceTimeline::new(frames, eases, cfg.animation_duration_frames);

        let camera = ScrollCamera::new(cfg.camera.clone(), cfg.spring, comp.events.len())
            .with_checkpoints(&plan, comp.fps);

        let effect_lists: Vec<&[_]> = comp.events.iter().map(|e| e.effects.as_slice()).collect();
        let fades = EffectFades {
            fade_in_secs: cfg.effect_fade_in_secs,
            fade_out_secs: cfg.effect_fade_out_secs,
        };
        let (effects, effect_diags) = EffectScheduler::new(&effect_lists, &plan, comp.fps, fades);
        let effects = effects.with_seed(comp.seed);
        diagnostics.extend(effect_diags);

        tracing::debug!(
            total_frames = plan.total_frames(),
            diagnostics = diagnostics.len(),
            "composition prepared"
        );

        Ok(Self {
            race_params: cfg.race_params(),
            format: cfg.format(),
            durations_secs: resolved.secs,
            plan,
            board,
            race,
            camera,
            effects,
            audio: None,
            diagnostics,
            comp,
        })
    }

    /// Attach decoded narration; frames then report a smoothed audio level.
    pub fn with_audio(mut self, pcm: AudioPcm) -> Self {
        self.audio = Some(pcm);
        self
    }

    /// Source composition.
    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    /// Resolved duration of every event, in seconds.
    pub fn durations_secs(&self) -> &[f64] {
        &self.durations_secs
    }

    /// Segment plan.
    pub fn plan(&self) -> &SegmentPlan {
        &self.plan
    }

    /// Board plan, for board compositions.
    pub fn board_plan(&self) -> Option<&BoardPlan> {
        self.board.as_ref()
    }

    /// Timeline length in frames.
    pub fn total_frames(&self) -> u64 {
        self.plan.total_frames()
    }

    /// Problems recovered while preparing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Effect schedule.
    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    /// Retire an effect instance from `frame` on.
    pub fn retire_effect(&mut self, id: InstanceId, frame: FrameIndex) -> bool {
        self.effects.retire(id, frame)
    }
}

fn resolve_ease(name: &str, fallback: Ease, diagnostics: &mut Vec<Diagnostic>) -> Ease {
    let (ease, fell_back) = Ease::from_name_or(name, fallback);
    if fell_back {
        diagnostics.push(Diagnostic::warn(
            DiagnosticKind::UnknownEasing,
            format!("unknown easing '{name}', using '{}'", fallback.name()),
        ));
    }
    ease
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Every visual parameter of one frame.
pub struct FrameState {
    /// Evaluated frame.
    pub frame: FrameIndex,
    /// Active segment, `None` for an empty composition.
    pub active_segment: Option<usize>,
    /// Key of the active event.
    pub event_key: Option<String>,
    /// Progress through the active segment.
    pub segment_progress: f64,
    /// Race transition state.
    pub race: Option<RaceStep>,
    /// Eased race progress, 1 when no transition is running.
    pub race_progress: f64,
    /// Camera offsets.
    pub camera: CameraState,
    /// Race bars, top to bottom.
    pub bars: Vec<BarState>,
    /// Value-axis ticks.
    pub axis: Vec<AxisTick>,
    /// Value-axis maximum.
    pub domain_max: f64,
    /// Effects of the active event.
    pub effects: Vec<EffectState>,
    /// Board phase, for board compositions.
    pub board_phase: Option<BoardPhaseState>,
    /// Smoothed narration level, when audio is attached.
    pub audio_level: Option<f64>,
    /// Problems recovered while evaluating this frame.
    pub diagnostics: Vec<Diagnostic>,
}

/// Stateless evaluator from prepared composition to frame state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(prepared))]
    /// Evaluate one frame. Frames past the end hold the last segment.
    pub fn eval_frame(prepared: &PreparedComposition, frame: FrameIndex) -> FrameState {
        let comp = &prepared.comp;
        let plan = &prepared.plan;
        let active = plan.active_index(frame);

        let race_step = prepared.race.step_at(plan, frame);
        let race = race_step
            .and_then(|step| {
                let from = prepared.race.frame(step.from)?;
                let to = prepared.race.frame(step.to)?;
                Some(interpolate_race(
                    &from.data,
                    &to.data,
                    step.eased,
                    &prepared.race_params,
                    comp.canvas,
                ))
            })
            .unwrap_or_default();

        let (effects, diagnostics) = match active {
            Some(idx) => prepared.effects.evaluate(
                idx,
                frame,
                comp.canvas,
                &prepared.format,
                |id| target_bounds(&race, id),
            ),
            None => (Vec::new(), Vec::new()),
        };

        FrameState {
            frame,
            active_segment: active,
            event_key: active.and_then(|i| comp.events.get(i)).map(|e| e.key.clone()),
            segment_progress: active.map_or(0.0, |i| plan.segment_progress(frame, i)),
            race: race_step,
            race_progress: race_step.map_or(1.0, |step| step.eased),
            camera: prepared.camera.state_at(frame, plan, comp.fps),
            bars: race.bars,
            axis: race.axis,
            domain_max: race.domain_max,
            effects,
            board_phase: prepared.board.as_ref().and_then(|b| b.phase(frame)),
            audio_level: prepared
                .audio
                .as_ref()
                .map(|pcm| smoothed_amplitude(pcm, comp.fps, frame, comp.config.amplitude)),
            diagnostics,
        }
    }
}

fn target_bounds(race: &RaceFrame, id: &str) -> Option<Rect> {
    race.bars
        .iter()
        .find(|b| b.id == id && b.opacity > 0.0)
        .map(|b| Rect::new(b.x, b.y, b.x + b.width, b.y + b.height))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
