use crate::{foundation::core::FrameIndex, timing::segments::Segment};

/// Index of the segment that is active at `frame`.
///
/// Segments are scanned from last to first and the first one with
/// `frame ∈ [start_i, start_{i+1})` wins, so a segment stays active through any trailing gap
/// until the next one begins. The last segment is bounded by `cutoff` (or its own end, whichever
/// is later); frames beyond that keep the last segment. Frames before the first segment resolve
/// to index 0. Returns `None` only when `segments` is empty.
pub fn resolve_active_segment(
    frame: FrameIndex,
    segments: &[Segment],
    cutoff: u64,
) -> Option<usize> {
    let last = segments.len().checked_sub(1)?;
    let f = frame.0;

    for i in (0..=last).rev() {
        let start = segments[i].start_frame;
        let upper = match segments.get(i + 1) {
            Some(next) => next.start_frame,
            None => cutoff.max(segments[i].end_frame),
        };
        if start <= f && f < upper {
            return Some(i);
        }
    }

    if f >= segments[last].start_frame {
        return Some(last);
    }
    Some(0)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/active.rs"]
mod tests;
