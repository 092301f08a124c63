use super::*;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

/// One second of stereo audio at 300 Hz sampling: silence for the first half, then a
/// constant level of 0.5.
fn half_silent() -> AudioPcm {
    let mut interleaved_f32 = Vec::new();
    for i in 0..300 {
        let v = if i < 150 { 0.0 } else { 0.5 };
        interleaved_f32.push(v);
        interleaved_f32.push(-v);
    }
    AudioPcm {
        sample_rate: 300,
        channels: 2,
        interleaved_f32,
    }
}

#[test]
fn frame_to_sample_uses_rational_fps() {
    let pcm = half_silent();
    assert_eq!(pcm.frame_to_sample(FrameIndex(0), fps()), 0);
    assert_eq!(pcm.frame_to_sample(FrameIndex(3), fps()), 30);
    assert!((pcm.duration_secs() - 1.0).abs() < 1e-12);
}

#[test]
fn rms_reads_the_frame_window() {
    let pcm = half_silent();
    assert_eq!(frame_rms(&pcm, fps(), FrameIndex(0)), 0.0);
    assert!((frame_rms(&pcm, fps(), FrameIndex(20)) - 0.5).abs() < 1e-9);
    // past the end of the track
    assert_eq!(frame_rms(&pcm, fps(), FrameIndex(31)), 0.0);
    assert_eq!(frame_rms(&AudioPcm::silent(48_000, 2), fps(), FrameIndex(0)), 0.0);
}

#[test]
fn envelope_rises_fast_and_falls_slowly() {
    let pcm = half_silent();
    let params = AmplitudeSmoothing::default();
    assert_eq!(smoothed_amplitude(&pcm, fps(), FrameIndex(10), params), 0.0);

    let first_loud = smoothed_amplitude(&pcm, fps(), FrameIndex(15), params);
    assert!((first_loud - 0.3).abs() < 1e-9);
    let settled = smoothed_amplitude(&pcm, fps(), FrameIndex(29), params);
    assert!(settled > 0.49 && settled <= 0.5);

    let after = smoothed_amplitude(&pcm, fps(), FrameIndex(30), params);
    assert!(after < settled && after > 0.4);
}

#[test]
fn envelope_is_order_independent() {
    let pcm = half_silent();
    let params = AmplitudeSmoothing::default();
    let forward: Vec<f64> = (0..40)
        .map(|f| smoothed_amplitude(&pcm, fps(), FrameIndex(f), params))
        .collect();
    let backward: Vec<f64> = (0..40)
        .rev()
        .map(|f| smoothed_amplitude(&pcm, fps(), FrameIndex(f), params))
        .collect();
    let mut backward = backward;
    backward.reverse();
    assert_eq!(forward, backward);
}
