use super::*;
use crate::timing::segments::SegmentPlan;

fn plan() -> SegmentPlan {
    // [0,60) gap [75,165) gap [180,225)
    SegmentPlan::from_frame_lengths(&[(60, 2.0), (90, 3.0), (45, 1.5)], 15)
}

#[test]
fn resolves_within_and_across_gaps() {
    let p = plan();
    let at = |f| resolve_active_segment(FrameIndex(f), p.segments(), p.total_frames());
    assert_eq!(at(0), Some(0));
    assert_eq!(at(59), Some(0));
    // the gap belongs to the segment that precedes it
    assert_eq!(at(60), Some(0));
    assert_eq!(at(74), Some(0));
    assert_eq!(at(75), Some(1));
    assert_eq!(at(179), Some(1));
    assert_eq!(at(180), Some(2));
    assert_eq!(at(224), Some(2));
}

#[test]
fn is_total_over_every_frame() {
    let p = plan();
    for f in 0..400 {
        let idx = resolve_active_segment(FrameIndex(f), p.segments(), p.total_frames());
        let idx = idx.expect("non-empty plan always resolves");
        assert!(idx < p.len());
    }
    assert_eq!(
        resolve_active_segment(FrameIndex(10_000), p.segments(), p.total_frames()),
        Some(2)
    );
}

#[test]
fn frames_before_first_segment_resolve_to_zero() {
    let segs = [
        Segment {
            index: 0,
            start_frame: 10,
            end_frame: 20,
            source_duration_secs: 0.0,
            duration_frames: 10,
        },
        Segment {
            index: 1,
            start_frame: 20,
            end_frame: 30,
            source_duration_secs: 0.0,
            duration_frames: 10,
        },
    ];
    assert_eq!(resolve_active_segment(FrameIndex(3), &segs, 30), Some(0));
}

#[test]
fn empty_segments_resolve_to_none() {
    assert_eq!(resolve_active_segment(FrameIndex(0), &[], 0), None);
}
