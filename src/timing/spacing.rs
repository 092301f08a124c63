/// How event start times are distributed across a fixed total duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Packed back to back from zero.
    #[default]
    Start,
    /// First event starts at 0, last event ends at `total`.
    SpaceBetween,
    /// Starts stepped by `(total + event) / (count + 1)`, symmetric around `total / 2`.
    SpaceAround,
    /// Equal free space before, between and after the events.
    SpaceEvenly,
}

/// Start times (seconds) for `count` events of `event_secs` each inside `total_secs`.
///
/// A single event is centered for every mode except [`Spacing::Start`]. Non-finite inputs are
/// treated as zero.
pub fn distribute_event_start_times(
    total_secs: f64,
    event_secs: f64,
    count: usize,
    spacing: Spacing,
) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let total = finite_or_zero(total_secs);
    let event = finite_or_zero(event_secs);
    let n = count as f64;

    if count == 1 {
        let start = match spacing {
            Spacing::Start => 0.0,
            _ => (total - event) / 2.0,
        };
        return vec![start];
    }

    match spacing {
        Spacing::Start => (0..count).map(|i| i as f64 * event).collect(),
        Spacing::SpaceBetween => {
            let step = (total - event) / (n - 1.0);
            (0..count).map(|i| i as f64 * step).collect()
        }
        Spacing::SpaceAround => {
            let step = (total + event) / (n + 1.0);
            let mid = (n - 1.0) / 2.0;
            (0..count)
                .map(|i| total / 2.0 + (i as f64 - mid) * step)
                .collect()
        }
        Spacing::SpaceEvenly => {
            let free = (total - n * event) / (n + 1.0);
            (0..count)
                .map(|i| free + i as f64 * (event + free))
                .collect()
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/spacing.rs"]
mod tests;
