use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn durations_map_to_ceil_frames_with_gaps_between() {
    let timing = SegmentTiming::new(fps30()).with_gap_secs(0.5);
    assert_eq!(timing.gap_frames, 15);

    let plan = SegmentPlan::build(&[2.0, 3.0, 1.5], &timing);
    let starts: Vec<u64> = plan.segments().iter().map(|s| s.start_frame).collect();
    let lengths: Vec<u64> = plan.segments().iter().map(|s| s.duration_frames).collect();
    assert_eq!(lengths, vec![60, 90, 45]);
    // cursor advances by duration + gap: 0, 60+15, 75+90+15
    assert_eq!(starts, vec![0, 75, 180]);
    assert_eq!(plan.total_frames(), 225);
}

#[test]
fn end_is_start_plus_duration_and_starts_increase() {
    let timing = SegmentTiming::new(fps30()).with_gap_frames(3);
    let plan = SegmentPlan::build(&[0.1, 0.75, 2.01, 4.0], &timing);
    let mut prev_start = None;
    for seg in plan.segments() {
        assert_eq!(seg.end_frame, seg.start_frame + seg.duration_frames);
        if let Some(p) = prev_start {
            assert!(seg.start_frame > p);
        }
        prev_start = Some(seg.start_frame);
    }
    assert_eq!(plan.segments()[0].duration_frames, 3);
    assert_eq!(plan.segments()[2].duration_frames, 61);
}

#[test]
fn invalid_durations_use_fallback() {
    let timing = SegmentTiming::new(fps30());
    let plan = SegmentPlan::build(&[f64::NAN, -1.0, 0.0, f64::INFINITY], &timing);
    for seg in plan.segments() {
        assert_eq!(seg.duration_frames, 90);
        assert_eq!(seg.source_duration_secs, 3.0);
    }
    assert_eq!(plan.total_frames(), 360);
}

#[test]
fn empty_input_yields_empty_plan() {
    let plan = SegmentPlan::build(&[], &SegmentTiming::new(fps30()));
    assert!(plan.is_empty());
    assert_eq!(plan.total_frames(), 0);
    assert_eq!(plan.active_index(FrameIndex(10)), None);
}

#[test]
fn progress_is_clamped_and_zero_length_safe() {
    let plan = SegmentPlan::from_frame_lengths(&[(10, 0.0), (0, 0.0), (20, 0.0)], 0);
    assert_eq!(plan.segment_progress(FrameIndex(0), 0), 0.0);
    assert_eq!(plan.segment_progress(FrameIndex(5), 0), 0.5);
    assert_eq!(plan.segment_progress(FrameIndex(99), 0), 1.0);

    assert_eq!(plan.segment_progress(FrameIndex(9), 1), 0.0);
    assert_eq!(plan.segment_progress(FrameIndex(10), 1), 1.0);

    assert_eq!(plan.segment_progress(FrameIndex(0), 7), 0.0);
    assert_eq!(plan.local_frame(FrameIndex(25), 2), 15);
    assert_eq!(plan.local_frame(FrameIndex(3), 2), 0);
}
