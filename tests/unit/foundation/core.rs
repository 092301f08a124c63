use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn ceil_snaps_binary_noise_to_whole_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(0.1), 3);
    assert_eq!(fps.secs_to_frames_ceil(1.5), 45);
    assert_eq!(fps.secs_to_frames_ceil(1.51), 46);
    assert_eq!(fps.secs_to_frames_round(0.49), 15);
}

#[test]
fn invalid_seconds_convert_to_zero_frames() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(f64::NAN), 0);
    assert_eq!(fps.secs_to_frames_ceil(-2.0), 0);
    assert_eq!(fps.secs_to_frames_floor(f64::INFINITY), 0);
}
