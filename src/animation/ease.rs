use std::f64::consts::FRAC_PI_2;

/// Easing functions used to map normalized animation progress.
///
/// Every `Out*` curve is the reflection of its `In*` counterpart: `out(t) == 1 - in(1 - t)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    #[default]
    #[serde(rename = "linear")]
    Linear,
    /// Quadratic ease-in.
    #[serde(rename = "quadIn")]
    InQuad,
    /// Quadratic ease-out.
    #[serde(rename = "quadOut")]
    OutQuad,
    /// Quadratic ease-in/out.
    #[serde(rename = "quadInOut")]
    InOutQuad,
    /// Cubic ease-in.
    #[serde(rename = "cubicIn")]
    InCubic,
    /// Cubic ease-out.
    #[serde(rename = "cubicOut")]
    OutCubic,
    /// Cubic ease-in/out.
    #[serde(rename = "cubicInOut")]
    InOutCubic,
    /// Sinusoidal ease-in.
    #[serde(rename = "sineIn")]
    InSine,
    /// Sinusoidal ease-out.
    #[serde(rename = "sineOut")]
    OutSine,
    /// Sinusoidal ease-in/out.
    #[serde(rename = "sineInOut")]
    InOutSine,
    /// Hermite smooth step `3t² - 2t³`.
    #[serde(rename = "smoothStep")]
    SmoothStep,
}

impl Ease {
    /// All supported easings, in declaration order.
    pub const ALL: [Ease; 11] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::SmoothStep,
    ];

    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - Self::InQuad.apply(1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - Self::InCubic.apply(1.0 - t),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => 1.0 - Self::InSine.apply(1.0 - t),
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Canonical configuration name (`"cubicInOut"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "quadIn",
            Self::OutQuad => "quadOut",
            Self::InOutQuad => "quadInOut",
            Self::InCubic => "cubicIn",
            Self::OutCubic => "cubicOut",
            Self::InOutCubic => "cubicInOut",
            Self::InSine => "sineIn",
            Self::OutSine => "sineOut",
            Self::InOutSine => "sineInOut",
            Self::SmoothStep => "smoothStep",
        }
    }

    /// Look up an easing by name.
    ///
    /// Matching ignores case, `_`/`-`/space separators and an optional `ease` prefix, and accepts
    /// both word orders, so `"cubicInOut"`, `"easeInOutCubic"` and `"in_out_cubic"` all resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        if let Some(rest) = key.strip_prefix("ease")
            && !rest.is_empty()
        {
            key = rest.to_owned();
        }

        let ease = match key.as_str() {
            "linear" | "none" => Self::Linear,
            "quadin" | "inquad" => Self::InQuad,
            "quadout" | "outquad" => Self::OutQuad,
            "quadinout" | "inoutquad" => Self::InOutQuad,
            "cubicin" | "incubic" => Self::InCubic,
            "cubicout" | "outcubic" => Self::OutCubic,
            "cubicinout" | "inoutcubic" => Self::InOutCubic,
            "sinein" | "insine" => Self::InSine,
            "sineout" | "outsine" => Self::OutSine,
            "sineinout" | "inoutsine" => Self::InOutSine,
            "smoothstep" => Self::SmoothStep,
            _ => return None,
        };
        Some(ease)
    }

    /// Resolve a name, falling back to `fallback` for unknown names.
    ///
    /// The second tuple element is `true` when the fallback was used.
    pub fn from_name_or(name: &str, fallback: Ease) -> (Self, bool) {
        match Self::from_name(name) {
            Some(ease) => (ease, false),
            None => (fallback, true),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
