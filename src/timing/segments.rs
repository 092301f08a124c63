use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::math::clamp01,
};

/// A contiguous span of frames during which one event is the primary visual focus.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Position of the event in the input list.
    pub index: usize,
    /// First frame of the segment.
    pub start_frame: u64,
    /// One past the last frame (`start_frame + duration_frames`).
    pub end_frame: u64,
    /// Duration in seconds the segment was derived from.
    pub source_duration_secs: f64,
    /// Length in frames.
    pub duration_frames: u64,
}

impl Segment {
    /// Frames covered by this segment.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }
}

/// Parameters of the seconds-to-frames conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentTiming {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Frames inserted between consecutive segments.
    pub gap_frames: u64,
    /// Substitute for non-positive or non-finite durations.
    pub fallback_secs: f64,
}

impl SegmentTiming {
    /// Default fallback duration, in seconds.
    pub const DEFAULT_FALLBACK_SECS: f64 = 3.0;

    /// Timing with no gap and the default fallback.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            gap_frames: 0,
            fallback_secs: Self::DEFAULT_FALLBACK_SECS,
        }
    }

    /// Set the inter-segment gap in frames.
    pub fn with_gap_frames(mut self, gap_frames: u64) -> Self {
        self.gap_frames = gap_frames;
        self
    }

    /// Set the inter-segment gap in seconds (rounded up to whole frames).
    pub fn with_gap_secs(mut self, gap_secs: f64) -> Self {
        self.gap_frames = self.fps.secs_to_frames_ceil(gap_secs);
        self
    }
}

/// Ordered, immutable list of segments plus the overall timeline length.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmentPlan {
    segments: Vec<Segment>,
    total_frames: u64,
}

impl SegmentPlan {
    /// Build a plan from per-event durations in seconds.
    ///
    /// Each event gets `ceil(secs * fps)` frames; the cursor advances by that plus the gap.
    /// Durations that are not finite or not positive are replaced by `timing.fallback_secs`.
    #[tracing::instrument(skip(durations_secs), fields(events = durations_secs.len()))]
    pub fn build(durations_secs: &[f64], timing: &SegmentTiming) -> Self {
        let fallback = sanitize_secs(timing.fallback_secs, SegmentTiming::DEFAULT_FALLBACK_SECS);
        let lengths: Vec<(u64, f64)> = durations_secs
            .iter()
            .enumerate()
            .map(|(idx, &secs)| {
                let secs = if secs.is_finite() && secs > 0.0 {
                    secs
                } else {
                    tracing::warn!(event = idx, secs, fallback, "invalid duration, using fallback");
                    fallback
                };
                (timing.fps.secs_to_frames_ceil(secs), secs)
            })
            .collect();
        Self::from_frame_lengths(&lengths, timing.gap_frames)
    }

    /// Build a plan from explicit `(duration_frames, source_duration_secs)` pairs.
    pub fn from_frame_lengths(lengths: &[(u64, f64)], gap_frames: u64) -> Self {
        let mut segments = Vec::with_capacity(lengths.len());
        let mut cursor = 0u64;
        for (index, &(duration_frames, source_duration_secs)) in lengths.iter().enumerate() {
            if index > 0 {
                cursor = cursor.saturating_add(gap_frames);
            }
            let start_frame = cursor;
            let end_frame = start_frame.saturating_add(duration_frames);
            segments.push(Segment {
                index,
                start_frame,
                end_frame,
                source_duration_secs,
                duration_frames,
            });
            cursor = end_frame;
        }
        Self {
            total_frames: cursor,
            segments,
        }
    }

    /// All segments in timeline order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segment at `index`.
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Timeline length in frames: the end of the last segment (no trailing gap).
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Active segment for `frame`, see [`crate::resolve_active_segment`].
    pub fn active_index(&self, frame: FrameIndex) -> Option<usize> {
        crate::timing::active::resolve_active_segment(frame, &self.segments, self.total_frames)
    }

    /// Frames elapsed since the start of segment `index` (0 before it starts).
    pub fn local_frame(&self, frame: FrameIndex, index: usize) -> u64 {
        self.segments
            .get(index)
            .map(|s| frame.0.saturating_sub(s.start_frame))
            .unwrap_or(0)
    }

    /// Progress through segment `index` in `[0, 1]`.
    ///
    /// Zero-length segments report 0 before their start frame and 1 from it on.
    pub fn segment_progress(&self, frame: FrameIndex, index: usize) -> f64 {
        let Some(seg) = self.segments.get(index) else {
            return 0.0;
        };
        if frame.0 < seg.start_frame {
            return 0.0;
        }
        if seg.duration_frames == 0 {
            return 1.0;
        }
        clamp01((frame.0 - seg.start_frame) as f64 / seg.duration_frames as f64)
    }
}

fn sanitize_secs(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/segments.rs"]
mod tests;
