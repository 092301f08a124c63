use super::*;

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn config(mode: CameraMode) -> CameraConfig {
    CameraConfig {
        initial_offset: 100.0,
        item_spacing: 400.0,
        item_extent: 300.0,
        viewport_extent: 1000.0,
        content_extent: None,
        mode,
        substeps: 4,
    }
}

fn plan() -> SegmentPlan {
    SegmentPlan::from_frame_lengths(&[(60, 2.0), (60, 2.0), (60, 2.0), (60, 2.0), (60, 2.0)], 0)
}

#[test]
fn targets_center_items_and_clamp() {
    let cam = ScrollCamera::new(config(CameraMode::Memoryless), SpringConfig::default(), 5);
    // content 100 + 5 * 400 = 2100, viewport 1000
    assert_eq!(cam.max_scroll(), 1100.0);
    // item 0 anchor 250 sits above the viewport center
    assert_eq!(cam.target_for(0), 0.0);
    // item 2 anchor 100 + 800 + 150 = 1050
    assert_eq!(cam.target_for(2), 550.0);
    assert_eq!(cam.target_for(4), 1100.0);
}

#[test]
fn short_content_never_scrolls() {
    let mut cfg = config(CameraMode::Memoryless);
    cfg.content_extent = Some(500.0);
    let cam = ScrollCamera::new(cfg, SpringConfig::default(), 5);
    assert_eq!(cam.max_scroll(), 0.0);
    assert_eq!(cam.target_for(3), 0.0);
}

#[test]
fn memoryless_blends_from_previous_target() {
    let cam = ScrollCamera::new(config(CameraMode::Memoryless), SpringConfig::default(), 5);
    let p = plan();
    let s0 = cam.state_at(FrameIndex(0), &p, fps());
    assert_eq!(s0.smoothed_scroll, 0.0);

    // at frame 120 the global spring has long settled, so the camera sits on the target
    let s = cam.state_at(FrameIndex(120), &p, fps());
    assert_eq!(s.target_scroll, 550.0);
    assert!((s.smoothed_scroll - 550.0).abs() < 1e-3);
}

#[test]
fn segment_relative_restarts_on_each_segment() {
    let cam = ScrollCamera::new(
        config(CameraMode::SegmentRelative),
        SpringConfig::default(),
        5,
    );
    let p = plan();
    let at_start = cam.state_at(FrameIndex(120), &p, fps());
    assert!((at_start.smoothed_scroll - cam.target_for(1)).abs() < 1e-9);
    let later = cam.state_at(FrameIndex(130), &p, fps());
    assert!(later.smoothed_scroll > at_start.smoothed_scroll);
    assert!(later.smoothed_scroll <= 550.0);
}

#[test]
fn smoothed_scroll_stays_in_range_for_every_mode() {
    let bouncy = SpringConfig {
        mass: 1.0,
        stiffness: 200.0,
        damping: 4.0,
    };
    for mode in [
        CameraMode::Memoryless,
        CameraMode::SegmentRelative,
        CameraMode::Integrated,
    ] {
        let cam = ScrollCamera::new(config(mode), bouncy, 5);
        let p = plan();
        for f in 0..320 {
            let s = cam.state_at(FrameIndex(f), &p, fps());
            assert!(s.smoothed_scroll >= 0.0 && s.smoothed_scroll <= s.max_scroll);
        }
    }
}

#[test]
fn integrated_mode_is_a_pure_function_of_frame() {
    let cam = ScrollCamera::new(config(CameraMode::Integrated), SpringConfig::default(), 5);
    let p = plan();
    let a = cam.state_at(FrameIndex(150), &p, fps());
    let _ = cam.state_at(FrameIndex(30), &p, fps());
    let b = cam.state_at(FrameIndex(150), &p, fps());
    assert_eq!(a, b);
    // settles on the target well after the last retarget
    let end = cam.state_at(FrameIndex(290), &p, fps());
    assert!((end.smoothed_scroll - 1100.0).abs() < 1.0);
}

#[test]
fn checkpoints_match_a_full_replay() {
    let bouncy = SpringConfig {
        mass: 1.0,
        stiffness: 200.0,
        damping: 4.0,
    };
    let p = SegmentPlan::from_frame_lengths(
        &[(45, 1.5), (0, 0.0), (90, 3.0), (12, 0.4), (60, 2.0)],
        7,
    );
    let full = ScrollCamera::new(config(CameraMode::Integrated), bouncy, 5);
    let fast = full.clone().with_checkpoints(&p, fps());
    assert_ne!(full, fast);
    for f in 0..p.total_frames() + 40 {
        let frame = FrameIndex(f);
        assert_eq!(
            full.state_at(frame, &p, fps()),
            fast.state_at(frame, &p, fps()),
            "frame {f}"
        );
    }

    // a different plan ignores the stored checkpoints
    let other = plan();
    for f in [0, 61, 200, 299] {
        let frame = FrameIndex(f);
        assert_eq!(
            full.state_at(frame, &other, fps()),
            fast.state_at(frame, &other, fps())
        );
    }
}

#[test]
fn checkpoints_are_only_kept_for_integrated_mode() {
    let p = plan();
    let cam = ScrollCamera::new(config(CameraMode::Memoryless), SpringConfig::default(), 5);
    assert_eq!(cam.clone().with_checkpoints(&p, fps()), cam);
}

#[test]
fn empty_plan_keeps_camera_at_rest() {
    let cam = ScrollCamera::new(config(CameraMode::Memoryless), SpringConfig::default(), 0);
    let s = cam.state_at(FrameIndex(5), &SegmentPlan::default(), fps());
    assert_eq!(s.smoothed_scroll, 0.0);
}
