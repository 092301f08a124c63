use std::{collections::BTreeSet, path::Path};

use crate::{
    animation::spring::SpringConfig,
    audio::amplitude::AmplitudeSmoothing,
    camera::scroll::CameraConfig,
    effects::model::EffectDef,
    foundation::core::{Canvas, Fps},
    foundation::error::{FramecueError, FramecueResult},
    ranking::format::{CompactFormat, MAX_DECIMALS},
    ranking::interp::{RaceLayout, RaceParams, RankLabelPolicy},
    ranking::model::{Datum, RankDirection},
    timing::board::BoardTiming,
    timing::resolve::DurationSource,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete animation document.
///
/// A composition is plain data that can be:
/// - built programmatically (see [`crate::CompositionBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Evaluating it goes through [`crate::PreparedComposition::prepare`] and
/// [`crate::Evaluator::eval_frame`].
pub struct Composition {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Seed mixed into every per-instance random stream.
    #[serde(default)]
    pub seed: u64,
    /// Rendering parameters.
    #[serde(default)]
    pub config: RenderConfig,
    /// Timed events, one segment each, in timeline order.
    pub events: Vec<EventDef>,
    /// Present for photo-board presentations; event durations are then narration lengths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardTiming>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One timed event: a data frame, the effects it triggers and how it is eased in.
pub struct EventDef {
    /// Label (week, season...). Unique within a composition.
    pub key: String,
    /// Duration in seconds or the asset that determines it.
    pub duration: DurationSource,
    /// Ranked items shown while this event is active.
    #[serde(default)]
    pub data: Vec<Datum>,
    /// Overlay effects introduced by this event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<EffectDef>,
    /// Easing name for the transition into this event. Falls back to the configured easing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Rendering parameters. Every field has a default.
pub struct RenderConfig {
    /// Visible race slots.
    pub top_k: usize,
    /// Head or tail of the ranking.
    pub direction: RankDirection,
    /// Gap between bands.
    pub bar_gap_px: f64,
    /// Shortest drawn bar.
    pub min_bar_length_px: f64,
    /// Lower bound of the value-axis maximum.
    pub value_floor: f64,
    /// Length of each race transition.
    pub animation_duration_frames: u64,
    /// Easing for race transitions.
    pub easing: String,
    /// Easing used when a name is not recognized.
    pub default_easing: String,
    /// Frames inserted between segments.
    pub gap_between_segments_frames: u64,
    /// Duration used when an event's duration cannot be determined.
    pub fallback_duration_secs: f64,
    /// Effect fade-in window.
    pub effect_fade_in_secs: f64,
    /// Effect fade-out window.
    pub effect_fade_out_secs: f64,
    /// Camera smoothing spring.
    pub spring: SpringConfig,
    /// Scroll geometry and smoothing mode.
    pub camera: CameraConfig,
    /// Race plot area.
    pub layout: RaceLayout,
    /// Value label prefix.
    pub currency_prefix: String,
    /// Value label precision.
    pub label_decimals: u32,
    /// Rank number policy.
    pub rank_label_policy: RankLabelPolicy,
    /// Audio envelope follower.
    pub amplitude: AmplitudeSmoothing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            direction: RankDirection::Forward,
            bar_gap_px: 4.0,
            min_bar_length_px: 0.0,
            value_floor: 10.0,
            animation_duration_frames: 30,
            easing: "cubicInOut".to_owned(),
            default_easing: "linear".to_owned(),
            gap_between_segments_frames: 0,
            fallback_duration_secs: 3.0,
            effect_fade_in_secs: 0.2,
            effect_fade_out_secs: 0.3,
            spring: SpringConfig::default(),
            camera: CameraConfig::default(),
            layout: RaceLayout::default(),
            currency_prefix: "$".to_owned(),
            label_decimals: 2,
            rank_label_policy: RankLabelPolicy::NearestSlot,
            amplitude: AmplitudeSmoothing::default(),
        }
    }
}

impl RenderConfig {
    /// Number formatting derived from the prefix and precision.
    pub fn format(&self) -> CompactFormat {
        CompactFormat::new(self.currency_prefix.clone(), self.label_decimals)
    }

    /// Race interpolation parameters.
    pub fn race_params(&self) -> RaceParams {
        RaceParams {
            top_k: self.top_k,
            direction: self.direction,
            bar_gap_px: self.bar_gap_px,
            min_bar_length_px: self.min_bar_length_px,
            value_floor: self.value_floor,
            rank_label_policy: self.rank_label_policy,
            format: self.format(),
            layout: self.layout,
        }
    }

    fn validate(&self) -> FramecueResult<()> {
        if self.top_k == 0 {
            return Err(FramecueError::validation("config top_k must be > 0"));
        }
        for (name, value) in [
            ("bar_gap_px", self.bar_gap_px),
            ("min_bar_length_px", self.min_bar_length_px),
            ("value_floor", self.value_floor),
            ("effect_fade_in_secs", self.effect_fade_in_secs),
            ("effect_fade_out_secs", self.effect_fade_out_secs),
            ("layout.margin_left", self.layout.margin_left),
            ("layout.margin_right", self.layout.margin_right),
            ("layout.margin_top", self.layout.margin_top),
            ("layout.margin_bottom", self.layout.margin_bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FramecueError::validation(format!(
                    "config {name} must be finite and >= 0"
                )));
            }
        }
        if self.label_decimals > MAX_DECIMALS {
            return Err(FramecueError::validation(format!(
                "config label_decimals must be <= {MAX_DECIMALS}"
            )));
        }
        if !self.fallback_duration_secs.is_finite() || self.fallback_duration_secs <= 0.0 {
            return Err(FramecueError::validation(
                "config fallback_duration_secs must be finite and > 0",
            ));
        }
        for (name, value) in [
            ("spring.mass", self.spring.mass),
            ("spring.stiffness", self.spring.stiffness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FramecueError::validation(format!(
                    "config {name} must be finite and > 0"
                )));
            }
        }
        if !self.spring.damping.is_finite() || self.spring.damping < 0.0 {
            return Err(FramecueError::validation(
                "config spring.damping must be finite and >= 0",
            ));
        }
        let cam = &self.camera;
        for (name, value) in [
            ("camera.initial_offset", cam.initial_offset),
            ("camera.item_spacing", cam.item_spacing),
            ("camera.item_extent", cam.item_extent),
            ("camera.viewport_extent", cam.viewport_extent),
        ] {
            if !value.is_finite() {
                return Err(FramecueError::validation(format!(
                    "config {name} must be finite"
                )));
            }
        }
        if let Some(c) = cam.content_extent
            && !c.is_finite()
        {
            return Err(FramecueError::validation(
                "config camera.content_extent must be finite when set",
            ));
        }
        Ok(())
    }
}

impl Composition {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> FramecueResult<Self> {
        let comp: Self = serde_json::from_str(json)
            .map_err(|e| FramecueError::serde(format!("composition json: {e}")))?;
        comp.validate()?;
        Ok(comp)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> FramecueResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FramecueError::Other(anyhow::Error::new(e).context(format!(
                "read composition '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> FramecueResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| FramecueError::serde(e.to_string()))
    }

    /// Check structural invariants that evaluation relies on.
    pub fn validate(&self) -> FramecueResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(FramecueError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FramecueError::validation("canvas width/height must be > 0"));
        }
        self.config.validate()?;

        let mut keys = BTreeSet::new();
        for event in &self.events {
            if event.key.trim().is_empty() {
                return Err(FramecueError::validation("event key must be non-empty"));
            }
            if !keys.insert(event.key.as_str()) {
                return Err(FramecueError::validation(format!(
                    "duplicate event key '{}'",
                    event.key
                )));
            }
            if let DurationSource::Asset { asset } = &event.duration
                && asset.as_os_str().is_empty()
            {
                return Err(FramecueError::validation(format!(
                    "event '{}' duration asset must be non-empty",
                    event.key
                )));
            }
            let mut ids = BTreeSet::new();
            for datum in &event.data {
                if !ids.insert(datum.id.as_str()) {
                    return Err(FramecueError::validation(format!(
                        "event '{}' has duplicate datum id '{}'",
                        event.key, datum.id
                    )));
                }
            }
            for effect in &event.effects {
                if !effect.delay_secs.is_finite() || effect.delay_secs < 0.0 {
                    return Err(FramecueError::validation(format!(
                        "event '{}' effect delay_secs must be finite and >= 0",
                        event.key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
