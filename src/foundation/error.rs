/// Convenience result type used across framecue.
pub type FramecueResult<T> = Result<T, FramecueError>;

/// Top-level error taxonomy used by the loading, preparation and probing APIs.
///
/// Per-frame evaluation of a prepared composition never returns these; degraded input is
/// reported through [`crate::Diagnostic`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum FramecueError {
    /// Invalid user-provided or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building a segment plan or resolving event durations.
    #[error("timing error: {0}")]
    Timing(String),

    /// Errors while evaluating frame state (thread pool setup, range checks).
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors from external media tooling (ffprobe/ffmpeg).
    #[error("media error: {0}")]
    Media(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecueError {
    /// Build a [`FramecueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramecueError::Timing`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    /// Build a [`FramecueError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`FramecueError::Media`] value.
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`FramecueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
