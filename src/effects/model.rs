use crate::foundation::{
    error::{FramecueError, FramecueResult},
    math::hash64,
};

fn default_duration_secs() -> f64 {
    1.5
}

/// Effect as declared on an event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectDef {
    /// Kind identifier (`confetti`, `surge`, `arrow`, `change`, `focus`, `lottie`, `loading`).
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    /// Identity of the bar the effect attaches to. Global effects have none.
    #[serde(default)]
    pub target: Option<String>,
    /// Visible lifetime.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Wait between introduction and activation.
    #[serde(default)]
    pub delay_secs: f64,
    /// Kind-specific parameters.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl EffectDef {
    /// Effect of `kind` with default timing and no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: None,
            duration_secs: default_duration_secs(),
            delay_secs: 0.0,
            params: serde_json::Value::Null,
        }
    }

    /// Attach to a target identity.
    pub fn target(mut self, id: impl Into<String>) -> Self {
        self.target = Some(id.into());
        self
    }

    /// Set the lifetime.
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Set the activation delay.
    pub fn delay_secs(mut self, secs: f64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Set the parameter object.
    pub fn params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Content signature: kind, target, position among the event's effects and parameters.
    ///
    /// `serde_json` objects keep their keys sorted, so the parameter text is canonical.
    pub fn signature(&self, ordinal: usize) -> u64 {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(self.kind.trim().to_ascii_lowercase().as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.target.as_deref().unwrap_or("").as_bytes());
        buf.push(0);
        buf.extend_from_slice(&(ordinal as u64).to_le_bytes());
        buf.extend_from_slice(&self.duration_secs.to_bits().to_le_bytes());
        buf.extend_from_slice(&self.delay_secs.to_bits().to_le_bytes());
        buf.extend_from_slice(self.params.to_string().as_bytes());
        hash64(0x5EED_EFFE, &buf)
    }
}

/// Direction an arrow effect points in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowDirection {
    /// Pointing up (rank gained).
    #[default]
    Up,
    /// Pointing down (rank lost).
    Down,
    /// Pointing left, at the bar end.
    Left,
    /// Pointing right.
    Right,
}

/// Parsed effect kind with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectKind {
    /// Burst of falling particles.
    Confetti {
        /// Particle count.
        particles: u32,
        /// Maximum horizontal launch speed, px/s.
        spread: f64,
    },
    /// Scale pulse on the target.
    Surge {
        /// Maximum scale factor.
        peak_scale: f64,
        /// Number of pulses over the lifetime.
        pulses: f64,
    },
    /// Bobbing arrow next to the target.
    Arrow {
        /// Pointing direction.
        direction: ArrowDirection,
        /// Bob amplitude in pixels.
        amplitude_px: f64,
    },
    /// Value delta label.
    Change {
        /// Signed delta.
        delta: f64,
    },
    /// Dims everything except the target and zooms toward it.
    Focus {
        /// Background dim amount in `[0, 1]`.
        dim: f64,
        /// Zoom factor.
        zoom: f64,
    },
    /// Pre-rendered animation overlay.
    Lottie {
        /// Animation asset.
        asset: String,
        /// Native frame rate.
        fps: f64,
        /// Playback speed multiplier.
        speed: f64,
        /// Restart after the last frame.
        looping: bool,
        /// Frame count, when known.
        frames: Option<u64>,
    },
    /// Spinner.
    Loading {
        /// Revolutions per minute.
        rpm: f64,
    },
    /// Unrecognized kind. Renders nothing.
    Unknown {
        /// Kind as written.
        kind: String,
    },
}

impl EffectKind {
    /// Canonical kind name.
    pub fn name(&self) -> &str {
        match self {
            Self::Confetti { .. } => "confetti",
            Self::Surge { .. } => "surge",
            Self::Arrow { .. } => "arrow",
            Self::Change { .. } => "change",
            Self::Focus { .. } => "focus",
            Self::Lottie { .. } => "lottie",
            Self::Loading { .. } => "loading",
            Self::Unknown { kind } => kind,
        }
    }

    /// Seconds after activation at which the effect retires.
    ///
    /// A loading spinner without a positive duration runs until it is retired explicitly.
    pub fn lifetime_secs(&self, duration_secs: f64) -> Option<f64> {
        let finite = duration_secs.is_finite() && duration_secs > 0.0;
        match self {
            Self::Loading { .. } if !finite => None,
            _ if finite => Some(duration_secs),
            _ => Some(0.0),
        }
    }
}

/// Parse an effect declaration into its kind.
pub fn parse_effect(def: &EffectDef) -> FramecueResult<EffectKind> {
    let kind = def.kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(FramecueError::validation("effect kind must be non-empty"));
    }
    let p = &def.params;
    if !(p.is_null() || p.is_object()) {
        return Err(FramecueError::validation(format!(
            "effect '{kind}' params must be an object"
        )));
    }

    match kind.as_str() {
        "confetti" => {
            let particles = get_u64_or(p, "particles", 60)?.min(500) as u32;
            let spread = get_f64_or(p, "spread", 400.0)?;
            Ok(EffectKind::Confetti { particles, spread })
        }
        "surge" => {
            let peak_scale = get_f64_or(p, "peak_scale", 1.15)?;
            let pulses = get_f64_or(p, "pulses", 1.0)?.max(0.0);
            Ok(EffectKind::Surge { peak_scale, pulses })
        }
        "arrow" => {
            let direction = match p.get("direction") {
                Some(v) => serde_json::from_value(v.clone()).map_err(|e| {
                    FramecueError::validation(format!("arrow direction: {e}"))
                })?,
                None => ArrowDirection::default(),
            };
            let amplitude_px = get_f64_or(p, "amplitude_px", 8.0)?;
            Ok(EffectKind::Arrow {
                direction,
                amplitude_px,
            })
        }
        "change" => Ok(EffectKind::Change {
            delta: get_f64_or(p, "delta", 0.0)?,
        }),
        "focus" => {
            let dim = get_f64_or(p, "dim", 0.6)?.clamp(0.0, 1.0);
            let zoom = get_f64_or(p, "zoom", 1.1)?;
            Ok(EffectKind::Focus { dim, zoom })
        }
        "lottie" => {
            let asset = match p.get("asset").or_else(|| p.get("src")) {
                Some(v) => v
                    .as_str()
                    .ok_or_else(|| FramecueError::validation("lottie asset must be a string"))?
                    .to_owned(),
                None => return Err(FramecueError::validation("missing effect param 'asset'")),
            };
            let looping = match p.get("loop") {
                Some(v) => v
                    .as_bool()
                    .ok_or_else(|| FramecueError::validation("lottie loop must be a bool"))?,
                None => false,
            };
            let frames = match p.get("frames") {
                Some(_) => Some(get_u64_or(p, "frames", 0)?),
                None => None,
            };
            Ok(EffectKind::Lottie {
                asset,
                fps: get_f64_or(p, "fps", 30.0)?.max(1e-3),
                speed: get_f64_or(p, "speed", 1.0)?.max(0.0),
                looping,
                frames,
            })
        }
        "loading" => Ok(EffectKind::Loading {
            rpm: get_f64_or(p, "rpm", 60.0)?,
        }),
        _ => Err(FramecueError::validation(format!(
            "unknown effect kind '{kind}'"
        ))),
    }
}

fn get_f64_or(obj: &serde_json::Value, key: &str, default: f64) -> FramecueResult<f64> {
    let Some(v) = obj.get(key) else {
        return Ok(default);
    };
    match v.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(FramecueError::validation(format!(
            "effect param '{key}' must be a finite number"
        ))),
    }
}

fn get_u64_or(obj: &serde_json::Value, key: &str, default: u64) -> FramecueResult<u64> {
    let Some(v) = obj.get(key) else {
        return Ok(default);
    };
    v.as_u64().ok_or_else(|| {
        FramecueError::validation(format!("effect param '{key}' must be a non-negative integer"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/model.rs"]
mod tests;
