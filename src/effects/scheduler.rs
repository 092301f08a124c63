use std::collections::{BTreeMap, HashMap};

use crate::{
    effects::model::{EffectDef, EffectKind, parse_effect},
    effects::visual::{EffectVisual, VisualContext, visual_for},
    foundation::core::{Canvas, Fps, FrameIndex, Rect},
    foundation::diag::{Diagnostic, DiagnosticKind},
    foundation::math::{clamp01, hash64},
    ranking::format::CompactFormat,
    timing::segments::SegmentPlan,
};

/// Identifier of one introduction of an effect signature.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct InstanceId(pub u64);

impl InstanceId {
    fn derive(signature: u64, introduced_at: u64) -> Self {
        let mut buf = [0u8; 16];
        buf[..8].copy_from_slice(&signature.to_le_bytes());
        buf[8..].copy_from_slice(&introduced_at.to_le_bytes());
        Self(hash64(0x1D_1D, &buf))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct InstanceRecord {
    signature: u64,
    introduced_at: u64,
    retired_at: Option<u64>,
}

/// Owner of every `instance → introduced-at frame` mapping.
///
/// A signature that is live (introduced and not retired) is never introduced twice; after it is
/// retired, seeing it again starts a new instance.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    live: HashMap<u64, InstanceId>,
    instances: BTreeMap<InstanceId, InstanceRecord>,
}

impl EffectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduce `signature` at `frame`, or return the live instance already carrying it.
    ///
    /// The flag is `true` when a new instance was created.
    pub fn introduce(&mut self, signature: u64, frame: FrameIndex) -> (InstanceId, bool) {
        if let Some(id) = self.live.get(&signature) {
            return (*id, false);
        }
        let id = InstanceId::derive(signature, frame.0);
        self.live.insert(signature, id);
        self.instances.insert(
            id,
            InstanceRecord {
                signature,
                introduced_at: frame.0,
                retired_at: None,
            },
        );
        tracing::trace!(instance = id.0, frame = frame.0, "effect introduced");
        (id, true)
    }

    /// Retire `id` at `frame`. Returns `false` for unknown or already retired instances.
    pub fn retire(&mut self, id: InstanceId, frame: FrameIndex) -> bool {
        let Some(rec) = self.instances.get_mut(&id) else {
            return false;
        };
        if rec.retired_at.is_some() {
            return false;
        }
        rec.retired_at = Some(frame.0);
        if self.live.get(&rec.signature) == Some(&id) {
            self.live.remove(&rec.signature);
        }
        true
    }

    /// Introduce every signature in `declared` and retire live signatures missing from it.
    ///
    /// Returns the instance carrying each declared signature, in input order.
    pub fn sync(&mut self, declared: &[u64], frame: FrameIndex) -> Vec<InstanceId> {
        let stale: Vec<InstanceId> = self
            .live
            .iter()
            .filter(|(sig, _)| !declared.contains(sig))
            .map(|(_, id)| *id)
            .collect();
        for id in stale {
            self.retire(id, frame);
        }
        declared
            .iter()
            .map(|sig| self.introduce(*sig, frame).0)
            .collect()
    }

    /// Frame at which `id` was introduced.
    pub fn introduced_at(&self, id: InstanceId) -> Option<FrameIndex> {
        self.instances.get(&id).map(|r| FrameIndex(r.introduced_at))
    }

    /// Frame at which `id` was retired, if it was.
    pub fn retired_at(&self, id: InstanceId) -> Option<FrameIndex> {
        self.instances
            .get(&id)
            .and_then(|r| r.retired_at)
            .map(FrameIndex)
    }

    /// Number of instances ever introduced.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` when nothing has been introduced.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Lifecycle phase of an effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectPhase {
    /// Introduced, waiting for its delay.
    Pending,
    /// Visible.
    Active,
    /// Lifetime elapsed or explicitly retired.
    Retired,
}

/// Target bounds in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetAnchor {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl From<Rect> for TargetAnchor {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x0,
            y: r.y0,
            w: r.width(),
            h: r.height(),
        }
    }
}

/// One effect as evaluated at a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectState {
    /// Instance identifier.
    pub instance: InstanceId,
    /// Kind name.
    pub kind: String,
    /// Declared target identity.
    pub target: Option<String>,
    /// Target bounds, when the target is on screen.
    pub target_anchor: Option<TargetAnchor>,
    /// Lifecycle phase.
    pub phase: EffectPhase,
    /// Seconds since activation (0 while pending).
    pub local_elapsed_secs: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Kind-specific drawing parameters.
    pub visual: EffectVisual,
}

/// Fade windows applied to every effect.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectFades {
    /// Seconds to reach full opacity after activation.
    pub fade_in_secs: f64,
    /// Seconds of fading before retirement.
    pub fade_out_secs: f64,
}

impl Default for EffectFades {
    fn default() -> Self {
        Self {
            fade_in_secs: 0.2,
            fade_out_secs: 0.3,
        }
    }
}

impl EffectFades {
    /// Opacity after `elapsed` seconds of a `lifetime` second effect.
    pub fn opacity(&self, elapsed: f64, lifetime: Option<f64>) -> f64 {
        let fade_in = ramp(elapsed, self.fade_in_secs);
        let fade_out = lifetime.map_or(1.0, |d| ramp(d - elapsed, self.fade_out_secs));
        clamp01(fade_in * fade_out)
    }
}

fn ramp(secs: f64, window: f64) -> f64 {
    if window > 0.0 {
        clamp01(secs / window)
    } else if secs >= 0.0 {
        1.0
    } else {
        0.0
    }
}

#[derive(Clone, Debug)]
struct Scheduled {
    def: EffectDef,
    kind: EffectKind,
    instance: InstanceId,
}

/// Evaluates the effects declared by the active event at any frame, without per-frame state.
///
/// Introductions are reconstructed once, at construction: walking the events in order, each
/// declared signature is introduced at the start of the first segment of the contiguous run of
/// events that declares it.
#[derive(Clone, Debug)]
pub struct EffectScheduler {
    per_event: Vec<Vec<Scheduled>>,
    registry: EffectRegistry,
    fps: Fps,
    fades: EffectFades,
    seed: u64,
}

impl EffectScheduler {
    /// Build the schedule for `events[i]` declared on segment `i` of `plan`.
    ///
    /// Effects that fail to parse become [`EffectKind::Unknown`] and are reported once.
    #[tracing::instrument(skip(events, plan))]
    pub fn new(
        events: &[&[EffectDef]],
        plan: &SegmentPlan,
        fps: Fps,
        fades: EffectFades,
    ) -> (Self, Vec<Diagnostic>) {
        let mut registry = EffectRegistry::new();
        let mut diagnostics = Vec::new();
        let mut per_event = Vec::with_capacity(events.len());

        for (idx, defs) in events.iter().enumerate() {
            let start = plan.get(idx).map_or(0, |s| s.start_frame);
            let signatures: Vec<u64> = defs
                .iter()
                .enumerate()
                .map(|(ordinal, def)| def.signature(ordinal))
                .collect();
            let instances = registry.sync(&signatures, FrameIndex(start));

            let scheduled = defs
                .iter()
                .zip(instances)
                .map(|(def, instance)| {
                    let kind = parse_effect(def).unwrap_or_else(|e| {
                        diagnostics.push(Diagnostic::warn(
                            DiagnosticKind::UnknownEffect,
                            format!("event {idx}: effect '{}' ignored: {e}", def.kind),
                        ));
                        EffectKind::Unknown {
                            kind: def.kind.clone(),
                        }
                    });
                    Scheduled {
                        def: def.clone(),
                        kind,
                        instance,
                    }
                })
                .collect();
            per_event.push(scheduled);
        }

        (
            Self {
                per_event,
                registry,
                fps,
                fades,
                seed: 0,
            },
            diagnostics,
        )
    }

    /// Mix `seed` into every instance's random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Introductions and retirements backing this schedule.
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Retire an instance early. Frames from `frame` on report it as retired.
    pub fn retire(&mut self, id: InstanceId, frame: FrameIndex) -> bool {
        self.registry.retire(id, frame)
    }

    /// Effects of event `event` at `frame`.
    ///
    /// `target_bounds` maps a target identity to its on-screen bounds; effects whose target is
    /// absent are hidden (opacity 0) and reported as [`DiagnosticKind::MissingTarget`].
    pub fn evaluate(
        &self,
        event: usize,
        frame: FrameIndex,
        canvas: Canvas,
        format: &CompactFormat,
        target_bounds: impl Fn(&str) -> Option<Rect>,
    ) -> (Vec<EffectState>, Vec<Diagnostic>) {
        let Some(scheduled) = self.per_event.get(event) else {
            return (Vec::new(), Vec::new());
        };
        let mut diagnostics = Vec::new();

        let states = scheduled
            .iter()
            .map(|s| {
                let introduced_at = self
                    .registry
                    .introduced_at(s.instance)
                    .map_or(frame.0, |f| f.0);
                let delay = self.fps.secs_to_frames_round(s.def.delay_secs);
                let active_from = introduced_at.saturating_add(delay);
                let lifetime = s.kind.lifetime_secs(s.def.duration_secs);

                let elapsed = if frame.0 >= active_from {
                    self.fps.frames_to_secs(frame.0 - active_from)
                } else {
                    0.0
                };
                let retired_explicitly = self
                    .registry
                    .retired_at(s.instance)
                    .is_some_and(|r| r.0 <= frame.0);
                let phase = if frame.0 < active_from {
                    EffectPhase::Pending
                } else if retired_explicitly || lifetime.is_some_and(|d| elapsed > d) {
                    EffectPhase::Retired
                } else {
                    EffectPhase::Active
                };

                let anchor = s.def.target.as_deref().and_then(&target_bounds);
                let missing = s.def.target.is_some() && anchor.is_none();
                if missing && phase == EffectPhase::Active {
                    diagnostics.push(Diagnostic::quiet(
                        DiagnosticKind::MissingTarget,
                        format!(
                            "effect '{}' target '{}' is not on screen",
                            s.kind.name(),
                            s.def.target.as_deref().unwrap_or_default()
                        ),
                    ));
                }

                let renders = phase == EffectPhase::Active
                    && !missing
                    && !matches!(s.kind, EffectKind::Unknown { .. });
                let (opacity, visual) = if renders {
                    let ctx = VisualContext {
                        seed: hash64(self.seed, &s.instance.0.to_le_bytes()),
                        elapsed_secs: elapsed,
                        lifetime_secs: lifetime,
                        anchor,
                        canvas,
                        format,
                    };
                    (
                        self.fades.opacity(elapsed, lifetime),
                        visual_for(&s.kind, &ctx),
                    )
                } else {
                    (0.0, EffectVisual::None)
                };

                EffectState {
                    instance: s.instance,
                    kind: s.kind.name().to_owned(),
                    target: s.def.target.clone(),
                    target_anchor: anchor.map(TargetAnchor::from),
                    phase,
                    local_elapsed_secs: elapsed,
                    opacity,
                    visual,
                }
            })
            .collect();

        (states, diagnostics)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scheduler.rs"]
mod tests;
