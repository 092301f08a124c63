use super::*;

#[test]
fn linear_maps_and_inverts() {
    let s = LinearScale::new((0.0, 200.0), (100.0, 500.0));
    assert_eq!(s.apply(0.0), 100.0);
    assert_eq!(s.apply(200.0), 500.0);
    assert_eq!(s.apply(50.0), 200.0);
    assert_eq!(s.invert(300.0), 100.0);
    assert_eq!(LinearScale::new((5.0, 5.0), (0.0, 10.0)).apply(5.0), 0.0);
}

#[test]
fn nice_rounds_domain_outward() {
    assert_eq!(LinearScale::new((0.0, 97.3), (0.0, 1.0)).nice(10).domain, (0.0, 100.0));
    assert_eq!(LinearScale::new((0.0, 1234.0), (0.0, 1.0)).nice(5).domain, (0.0, 1400.0));
    assert_eq!(LinearScale::new((0.0, 10.0), (0.0, 1.0)).nice(10).domain, (0.0, 10.0));
}

#[test]
fn ticks_land_on_round_values() {
    let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
    let t = s.ticks(10);
    assert_eq!(t.len(), 11);
    assert_eq!(t[3], 0.3);

    let t = LinearScale::new((0.0, 1400.0), (0.0, 1.0)).ticks(5);
    assert_eq!(t, vec![0.0, 200.0, 400.0, 600.0, 800.0, 1000.0, 1200.0, 1400.0]);
    assert!(LinearScale::new((0.0, 1.0), (0.0, 1.0)).ticks(0).is_empty());
}

#[test]
fn subnormal_domains_yield_bounded_ticks() {
    for max in [1e-309, 5e-310, f64::MIN_POSITIVE, 5e-324] {
        let s = LinearScale::new((0.0, max), (0.0, 1.0)).nice(5);
        let t = s.ticks(5);
        assert!(t.len() <= 21, "{max:e} gave {} ticks", t.len());
        assert!(t.iter().all(|v| v.is_finite()));
    }
    let t = LinearScale::new((0.0, 1e300), (0.0, 1.0)).ticks(5);
    assert!(!t.is_empty() && t.len() <= 21);
}

#[test]
fn bands_split_the_range() {
    let b = BandScale::new((100.0, 600.0), 5, 4.0);
    assert_eq!(b.step(), 100.0);
    assert_eq!(b.bandwidth(), 96.0);
    assert_eq!(b.center(0.0), 150.0);
    assert_eq!(b.center(4.0), 550.0);
    // exit coordinates one slot past either end
    assert_eq!(b.center(5.0), 650.0);
    assert_eq!(b.center(-1.0), 50.0);
    assert_eq!(BandScale::new((0.0, 10.0), 0, 1.0).bandwidth(), 0.0);
}
