/// Continuous linear mapping from a value domain to a pixel range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearScale {
    /// Input interval.
    pub domain: (f64, f64),
    /// Output interval.
    pub range: (f64, f64),
}

impl LinearScale {
    /// Scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range. A degenerate domain maps everything to `range.0`.
    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = crate::foundation::math::inverse_lerp(d0, d1, v);
        crate::foundation::math::lerp(r0, r1, t)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = crate::foundation::math::inverse_lerp(r0, r1, px);
        crate::foundation::math::lerp(d0, d1, t)
    }

    /// Extend the domain outward to round tick boundaries for roughly `count` ticks.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || start == stop {
            return self;
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut prev_step = None;
        for _ in 0..10 {
            let step = tick_step(start, stop, count);
            if prev_step == Some(step) || step <= 0.0 || !step.is_finite() {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prev_step = Some(step);
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        let (start, stop) = if a <= b { (a, b) } else { (b, a) };
        if !(start.is_finite() && stop.is_finite()) || count == 0 {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let step = tick_step(start, stop, count);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }
        // divide by the inverse step so that fractional ticks come out as 0.3, not 0.30000000000000004
        let (scale, divide) = if step >= 1.0 {
            (step, false)
        } else {
            ((1.0 / step).round(), true)
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Vec::new();
        }
        let (lo, hi) = if divide {
            ((start * scale).ceil(), (stop * scale).floor())
        } else {
            ((start / scale).ceil(), (stop / scale).floor())
        };
        let max_ticks = count.saturating_mul(4).saturating_add(1) as f64;
        if !(lo.is_finite() && hi.is_finite()) || hi < lo || hi - lo >= max_ticks {
            return Vec::new();
        }
        let (lo, hi) = (lo as i64, hi as i64);
        (lo..=hi)
            .map(|i| if divide { i as f64 / scale } else { i as f64 * scale })
            .collect()
    }
}

/// Tick spacing of 1, 2 or 5 times a power of ten that yields about `count` ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Discrete slots spread evenly over a pixel range, with a fixed gap between bands.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandScale {
    /// Output interval.
    pub range: (f64, f64),
    /// Number of slots.
    pub count: usize,
    /// Pixels left empty between neighbouring bands.
    pub gap: f64,
}

impl BandScale {
    /// `count` slots across `range`.
    pub fn new(range: (f64, f64), count: usize, gap: f64) -> Self {
        Self { range, count, gap }
    }

    /// Distance between consecutive slot starts.
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Band thickness, `step - gap`, never negative.
    pub fn bandwidth(&self) -> f64 {
        (self.step() - self.gap).max(0.0)
    }

    /// Center of slot `slot`. Fractional and out-of-range slots extrapolate linearly, which is
    /// how entering and leaving items reach their exit coordinate.
    pub fn center(&self, slot: f64) -> f64 {
        self.range.0 + (slot + 0.5) * self.step()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ranking/scale.rs"]
mod tests;
