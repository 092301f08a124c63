use std::f64::consts::{PI, TAU};

use crate::{
    animation::ease::Ease,
    effects::model::{ArrowDirection, EffectKind},
    foundation::core::{Canvas, Point, Rect},
    foundation::math::clamp01,
    foundation::rng::Rng64,
    ranking::format::CompactFormat,
    ranking::model::Color,
};

const GRAVITY_PX_S2: f64 = 1200.0;
const CONFETTI_COLORS: [Color; 5] = [
    Color::rgb(0xff, 0x4d, 0x4d),
    Color::rgb(0xff, 0xc8, 0x3d),
    Color::rgb(0x4d, 0xd2, 0x7a),
    Color::rgb(0x4d, 0xa6, 0xff),
    Color::rgb(0xc2, 0x6b, 0xff),
];

/// One confetti piece.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    /// Position.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Fill.
    pub color: Color,
}

/// Kind-specific drawing parameters of an active effect at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectVisual {
    /// Nothing to draw.
    None,
    /// Particle positions.
    Confetti {
        /// Particles still on the canvas.
        particles: Vec<Particle>,
    },
    /// Target scale factor.
    Surge {
        /// Scale applied around the target center.
        scale: f64,
    },
    /// Arrow placement.
    Arrow {
        /// Pointing direction.
        direction: ArrowDirection,
        /// Offset along the pointing axis, in pixels.
        offset_px: f64,
    },
    /// Delta label.
    Change {
        /// Signed delta.
        delta: f64,
        /// Formatted delta with an explicit sign.
        text: String,
    },
    /// Focus overlay.
    Focus {
        /// Background dim in `[0, 1]`.
        dim: f64,
        /// Zoom factor.
        zoom: f64,
    },
    /// Overlay animation frame.
    Lottie {
        /// Animation asset.
        asset: String,
        /// Frame of the animation to show.
        frame: u64,
    },
    /// Spinner rotation.
    Loading {
        /// Angle in radians, in `[0, 2π)`.
        angle_rad: f64,
    },
}

/// Inputs shared by every kind when computing a visual.
#[derive(Clone, Copy, Debug)]
pub struct VisualContext<'a> {
    /// Per-instance seed.
    pub seed: u64,
    /// Seconds since activation.
    pub elapsed_secs: f64,
    /// Retirement time, if bounded.
    pub lifetime_secs: Option<f64>,
    /// Target bounds, if the effect has an on-screen target.
    pub anchor: Option<Rect>,
    /// Output canvas.
    pub canvas: Canvas,
    /// Number formatting for labels.
    pub format: &'a CompactFormat,
}

/// Drawing parameters for `kind` at the context's elapsed time.
pub fn visual_for(kind: &EffectKind, ctx: &VisualContext<'_>) -> EffectVisual {
    let t = ctx.elapsed_secs.max(0.0);
    match kind {
        EffectKind::Confetti { particles, spread } => EffectVisual::Confetti {
            particles: confetti(*particles, *spread, t, ctx),
        },
        EffectKind::Surge { peak_scale, pulses } => {
            let life = ctx.lifetime_secs.filter(|d| *d > 0.0).unwrap_or(1.0);
            let phase = clamp01(t / life) * pulses;
            EffectVisual::Surge {
                scale: 1.0 + (peak_scale - 1.0) * (PI * phase).sin().abs(),
            }
        }
        EffectKind::Arrow {
            direction,
            amplitude_px,
        } => EffectVisual::Arrow {
            direction: *direction,
            offset_px: amplitude_px * (TAU * 1.5 * t).sin(),
        },
        EffectKind::Change { delta } => {
            let sign = if *delta > 0.0 { "+" } else { "" };
            EffectVisual::Change {
                delta: *delta,
                text: format!("{sign}{}", ctx.format.format(*delta)),
            }
        }
        EffectKind::Focus { dim, zoom } => {
            let ramp = Ease::SmoothStep.apply(t / 0.5);
            EffectVisual::Focus {
                dim: dim * ramp,
                zoom: 1.0 + (zoom - 1.0) * ramp,
            }
        }
        EffectKind::Lottie {
            asset,
            fps,
            speed,
            looping,
            frames,
        } => {
            let raw = (t * fps * speed).floor().max(0.0) as u64;
            let frame = match (*frames, *looping) {
                (Some(0), _) => 0,
                (Some(n), true) => raw % n,
                (Some(n), false) => raw.min(n - 1),
                (None, _) => raw,
            };
            EffectVisual::Lottie {
                asset: asset.clone(),
                frame,
            }
        }
        EffectKind::Loading { rpm } => EffectVisual::Loading {
            angle_rad: (TAU * rpm / 60.0 * t).rem_euclid(TAU),
        },
        EffectKind::Unknown { .. } => EffectVisual::None,
    }
}

fn confetti(count: u32, spread: f64, t: f64, ctx: &VisualContext<'_>) -> Vec<Particle> {
    let origin = match ctx.anchor {
        Some(r) => r.center(),
        None => Point::new(f64::from(ctx.canvas.width) / 2.0, f64::from(ctx.canvas.height) / 3.0),
    };
    let floor = f64::from(ctx.canvas.height);
    let mut rng = Rng64::new(ctx.seed);

    (0..count)
        .filter_map(|_| {
            // draw every value so particle i is the same regardless of which others are culled
            let vx = rng.range(-spread, spread);
            let vy = rng.range(-900.0, -400.0);
            let spin = rng.range(-8.0, 8.0);
            let color = CONFETTI_COLORS[(rng.next_u64() % CONFETTI_COLORS.len() as u64) as usize];

            let position = Point::new(
                origin.x + vx * t,
                origin.y + vy * t + 0.5 * GRAVITY_PX_S2 * t * t,
            );
            (position.y <= floor).then_some(Particle {
                position,
                rotation: spin * t,
                color,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/visual.rs"]
mod tests;
