use crate::foundation::core::Fps;

const MIN_PARAM: f64 = 1e-4;
const CRITICAL_EPS: f64 = 1e-6;

/// Damped spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Mass of the moving body.
    pub mass: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Viscous damping coefficient.
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critical(100.0, 1.0)
    }
}

impl SpringConfig {
    /// Critically damped spring for the given stiffness and mass.
    pub fn critical(stiffness: f64, mass: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping: critical_damping(stiffness, mass),
        }
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`. `1` is critical damping.
    pub fn damping_ratio(&self) -> f64 {
        let (m, k, c) = self.sanitized();
        c / (2.0 * (k * m).sqrt())
    }

    /// Closed-form position of a spring released at rest from 0 toward 1, after `t_secs`.
    ///
    /// Under-damped springs overshoot 1 before settling; critically and over-damped springs
    /// approach 1 monotonically. Negative or non-finite time yields 0.
    pub fn progress(&self, t_secs: f64) -> f64 {
        if !t_secs.is_finite() || t_secs <= 0.0 {
            return 0.0;
        }
        let (m, k, _) = self.sanitized();
        let omega0 = (k / m).sqrt();
        let zeta = self.damping_ratio();
        let t = t_secs;

        if (zeta - 1.0).abs() < CRITICAL_EPS {
            1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
        } else if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            1.0 - envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
        }
    }

    /// [`SpringConfig::progress`] sampled at a frame offset.
    pub fn progress_at_frame(&self, frames: u64, fps: Fps) -> f64 {
        self.progress(fps.frames_to_secs(frames))
    }

    fn sanitized(&self) -> (f64, f64, f64) {
        let m = finite_or(self.mass, 1.0).max(MIN_PARAM);
        let k = finite_or(self.stiffness, 100.0).max(MIN_PARAM);
        let c = finite_or(self.damping, 0.0).max(0.0);
        (m, k, c)
    }
}

/// Damping coefficient giving critical damping for `stiffness` and `mass`.
pub fn critical_damping(stiffness: f64, mass: f64) -> f64 {
    2.0 * (stiffness.max(MIN_PARAM) * mass.max(MIN_PARAM)).sqrt()
}

/// Explicit spring state with carried velocity, advanced by numerical integration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    /// Current position.
    pub position: f64,
    /// Current velocity (units per second).
    pub velocity: f64,
}

impl SpringState {
    /// State at rest at `position`.
    pub fn at_rest(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    /// Advance by `dt` seconds toward `target` (semi-implicit Euler).
    pub fn step(&mut self, cfg: &SpringConfig, target: f64, dt: f64) {
        let (m, k, c) = cfg.sanitized();
        let dt = dt.max(1e-6);
        let accel = (k * (target - self.position) - c * self.velocity) / m;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
