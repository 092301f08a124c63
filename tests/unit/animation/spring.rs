use super::*;

#[test]
fn default_is_critically_damped() {
    let cfg = SpringConfig::default();
    assert!((cfg.damping_ratio() - 1.0).abs() < 1e-9);
}

#[test]
fn progress_starts_at_zero_and_settles_at_one() {
    let configs = [
        SpringConfig::default(),
        SpringConfig {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
        },
        SpringConfig {
            mass: 1.0,
            stiffness: 100.0,
            damping: 60.0,
        },
    ];
    for cfg in configs {
        assert_eq!(cfg.progress(0.0), 0.0);
        assert_eq!(cfg.progress(-1.0), 0.0);
        assert!((cfg.progress(20.0) - 1.0).abs() < 1e-6, "{cfg:?}");
    }
}

#[test]
fn critical_and_overdamped_never_overshoot() {
    for damping in [20.0, 45.0] {
        let cfg = SpringConfig {
            mass: 1.0,
            stiffness: 100.0,
            damping,
        };
        let mut prev = 0.0;
        for i in 1..=300 {
            let p = cfg.progress(f64::from(i) / 60.0);
            assert!(p <= 1.0 + 1e-12);
            assert!(p + 1e-12 >= prev);
            prev = p;
        }
    }
}

#[test]
fn underdamped_overshoots() {
    let cfg = SpringConfig {
        mass: 1.0,
        stiffness: 100.0,
        damping: 10.0,
    };
    let peak = (1..=120)
        .map(|i| cfg.progress(f64::from(i) / 60.0))
        .fold(0.0, f64::max);
    assert!(peak > 1.05);
}

#[test]
fn integration_tracks_closed_form() {
    let cfg = SpringConfig::default();
    let mut state = SpringState::at_rest(0.0);
    let dt = 1.0 / 2400.0;
    for _ in 0..2400 {
        state.step(&cfg, 1.0, dt);
    }
    assert!((state.position - cfg.progress(1.0)).abs() < 1e-2);
}

#[test]
fn frame_sampling_uses_fps() {
    let cfg = SpringConfig::default();
    let fps = Fps::new(30, 1).unwrap();
    assert!((cfg.progress_at_frame(15, fps) - cfg.progress(0.5)).abs() < 1e-12);
    assert_eq!(cfg.progress_at_frame(0, fps), 0.0);
}
