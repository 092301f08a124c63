//! Timing for photo-board style presentations where every entity zooms in, is narrated over its
//! audio track, optionally holds, and zooms out again.

use crate::{
    foundation::core::{Fps, FrameIndex},
    foundation::math::clamp01,
    timing::segments::SegmentPlan,
};

/// Transition parameters for board-style entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardTiming {
    /// Length of the zoom-in and zoom-out transitions.
    pub transition_frames: u64,
    /// Extra frames held after narration ends.
    pub hold_frames: u64,
    /// Frames of narration that overlap the outgoing transition of the previous entity.
    pub transition_out_lead_frames: u64,
}

impl BoardTiming {
    /// On-screen frames for an entity whose narration lasts `audio_frames`.
    pub fn entity_frames(&self, audio_frames: u64) -> u64 {
        audio_frames
            .saturating_sub(self.transition_out_lead_frames)
            .saturating_add(self.transition_frames.saturating_mul(2))
            .saturating_add(self.hold_frames)
    }
}

/// Phase of a board entity at a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardPhase {
    /// Camera zooms toward the entity.
    ZoomIn,
    /// Narration plays.
    Narrate,
    /// Narration ended, entity stays in focus.
    Hold,
    /// Camera zooms back out.
    ZoomOut,
}

/// Phase plus progress through it, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardPhaseState {
    /// Entity (segment) index.
    pub entity: usize,
    /// Current phase.
    pub phase: BoardPhase,
    /// Progress through the current phase.
    pub progress: f64,
}

/// Segment plan for board entities together with the timing that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardPlan {
    /// Segments, one per entity.
    pub plan: SegmentPlan,
    /// Narration length per entity, in frames.
    pub audio_frames: Vec<u64>,
    /// Transition parameters.
    pub timing: BoardTiming,
}

/// Build a board plan from narration durations in seconds. Entities are laid out back to back.
///
/// Non-positive or non-finite durations use `fallback_secs`.
#[tracing::instrument(skip(audio_secs), fields(entities = audio_secs.len()))]
pub fn build_board_plan(
    audio_secs: &[f64],
    fps: Fps,
    timing: BoardTiming,
    fallback_secs: f64,
) -> BoardPlan {
    let audio_frames: Vec<u64> = audio_secs
        .iter()
        .enumerate()
        .map(|(idx, &secs)| {
            let secs = if secs.is_finite() && secs > 0.0 {
                secs
            } else {
                tracing::warn!(entity = idx, secs, fallback_secs, "invalid narration duration");
                fallback_secs
            };
            fps.secs_to_frames_ceil(secs)
        })
        .collect();

    let lengths: Vec<(u64, f64)> = audio_frames
        .iter()
        .map(|&a| {
            let frames = timing.entity_frames(a);
            (frames, fps.frames_to_secs(frames))
        })
        .collect();

    BoardPlan {
        plan: SegmentPlan::from_frame_lengths(&lengths, 0),
        audio_frames,
        timing,
    }
}

impl BoardPlan {
    /// Phase of the entity active at `frame`. `None` for an empty plan.
    pub fn phase(&self, frame: FrameIndex) -> Option<BoardPhaseState> {
        let entity = self.plan.active_index(frame)?;
        let seg = self.plan.get(entity)?;
        let local = frame.0.saturating_sub(seg.start_frame);
        let audio = self.audio_frames.get(entity).copied().unwrap_or(0);

        let t = self.timing.transition_frames;
        let narrate = audio.saturating_sub(self.timing.transition_out_lead_frames);
        let hold = self.timing.hold_frames;

        let phases = [
            (BoardPhase::ZoomIn, t),
            (BoardPhase::Narrate, narrate),
            (BoardPhase::Hold, hold),
            (BoardPhase::ZoomOut, t),
        ];

        let mut cursor = 0u64;
        for (phase, len) in phases {
            if len > 0 && local < cursor + len {
                return Some(BoardPhaseState {
                    entity,
                    phase,
                    progress: clamp01((local - cursor) as f64 / len as f64),
                });
            }
            cursor += len;
        }

        Some(BoardPhaseState {
            entity,
            phase: BoardPhase::ZoomOut,
            progress: 1.0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/board.rs"]
mod tests;
