use crate::{
    composition::model::{Composition, EventDef, RenderConfig},
    effects::model::EffectDef,
    foundation::core::{Canvas, Fps},
    foundation::error::{FramecueError, FramecueResult},
    ranking::model::Datum,
    timing::board::BoardTiming,
    timing::resolve::DurationSource,
};

/// Builder for [`Composition`](crate::Composition).
pub struct CompositionBuilder {
    fps: Fps,
    canvas: Canvas,
    seed: u64,
    config: RenderConfig,
    events: Vec<EventDef>,
    board: Option<BoardTiming>,
}

impl CompositionBuilder {
    /// Create a builder for a new composition.
    pub fn new(fps: Fps, canvas: Canvas) -> Self {
        Self {
            fps,
            canvas,
            seed: 0,
            config: RenderConfig::default(),
            events: Vec::new(),
            board: None,
        }
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the render configuration.
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Lay the composition out as a photo board.
    pub fn board(mut self, timing: BoardTiming) -> Self {
        self.board = Some(timing);
        self
    }

    /// Append an event. Keys must be unique.
    pub fn event(mut self, event: EventDef) -> FramecueResult<Self> {
        if self.events.iter().any(|e| e.key == event.key) {
            return Err(FramecueError::validation(format!(
                "duplicate event key '{}'",
                event.key
            )));
        }
        self.events.push(event);
        Ok(self)
    }

    /// Build and validate the final [`Composition`](crate::Composition).
    pub fn build(self) -> FramecueResult<Composition> {
        let comp = Composition {
            fps: self.fps,
            canvas: self.canvas,
            seed: self.seed,
            config: self.config,
            events: self.events,
            board: self.board,
        };
        comp.validate()?;
        Ok(comp)
    }
}

/// Builder for a single [`EventDef`].
pub struct EventBuilder {
    event: EventDef,
}

impl EventBuilder {
    /// Event `key` lasting `secs` seconds.
    pub fn new(key: impl Into<String>, secs: f64) -> Self {
        Self::with_duration(key, DurationSource::from(secs))
    }

    /// Event whose duration is that of `asset`.
    pub fn from_asset(key: impl Into<String>, asset: impl Into<std::path::PathBuf>) -> Self {
        Self::with_duration(
            key,
            DurationSource::Asset {
                asset: asset.into(),
            },
        )
    }

    fn with_duration(key: impl Into<String>, duration: DurationSource) -> Self {
        Self {
            event: EventDef {
                key: key.into(),
                duration,
                data: Vec::new(),
                effects: Vec::new(),
                easing: None,
            },
        }
    }

    /// Add a ranked item.
    pub fn datum(mut self, id: impl Into<String>, value: f64) -> Self {
        self.event.data.push(Datum::new(id, value));
        self
    }

    /// Add a fully specified ranked item.
    pub fn datum_full(mut self, datum: Datum) -> Self {
        self.event.data.push(datum);
        self
    }

    /// Add an overlay effect.
    pub fn effect(mut self, effect: EffectDef) -> Self {
        self.event.effects.push(effect);
        self
    }

    /// Easing for the transition into this event.
    pub fn easing(mut self, name: impl Into<String>) -> Self {
        self.event.easing = Some(name.into());
        self
    }

    /// Finish the event.
    pub fn build(self) -> EventDef {
        self.event
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/builder.rs"]
mod tests;
