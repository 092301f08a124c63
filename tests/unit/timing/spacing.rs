use super::*;

fn approx(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
}

#[test]
fn space_between_pins_first_and_last() {
    let starts = distribute_event_start_times(2.0, 1.0, 3, Spacing::SpaceBetween);
    assert!(approx(&starts, &[0.0, 0.5, 1.0]), "{starts:?}");
}

#[test]
fn space_around_is_symmetric_about_the_middle() {
    let starts = distribute_event_start_times(2.0, 1.0, 3, Spacing::SpaceAround);
    assert!(approx(&starts, &[0.25, 1.0, 1.75]), "{starts:?}");
}

#[test]
fn space_evenly_leaves_equal_gaps() {
    let starts = distribute_event_start_times(10.0, 2.0, 3, Spacing::SpaceEvenly);
    assert!(approx(&starts, &[1.0, 4.0, 7.0]), "{starts:?}");
}

#[test]
fn start_packs_back_to_back() {
    let starts = distribute_event_start_times(10.0, 2.0, 3, Spacing::Start);
    assert!(approx(&starts, &[0.0, 2.0, 4.0]));
}

#[test]
fn degenerate_counts() {
    assert!(distribute_event_start_times(2.0, 1.0, 0, Spacing::SpaceBetween).is_empty());
    assert!(approx(
        &distribute_event_start_times(2.0, 1.0, 1, Spacing::SpaceBetween),
        &[0.5]
    ));
    assert!(approx(
        &distribute_event_start_times(2.0, 1.0, 1, Spacing::Start),
        &[0.0]
    ));
}
