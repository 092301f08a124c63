use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Linear interpolation that returns `a` exactly at `t == 0` and `b` exactly at `t == 1`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Inverse of [`lerp`]: where `v` sits between `a` and `b`. Degenerate spans map to 0.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span == 0.0 || !span.is_finite() {
        return 0.0;
    }
    (v - a) / span
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Seeded 64-bit content hash used for signatures and per-instance seeds.
pub(crate) fn hash64(seed: u64, bytes: &[u8]) -> u64 {
    xxh3_64_with_seed(bytes, seed)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
