/// Category of a recovered, non-fatal problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An event duration could not be resolved and the fallback was used.
    DurationFallback,
    /// An easing name was not recognized and the default easing was used.
    UnknownEasing,
    /// An effect kind or its parameters could not be understood; the effect renders nothing.
    UnknownEffect,
    /// An effect targets an identity that is not on screen; the effect is hidden.
    MissingTarget,
}

/// A recovered problem surfaced to the caller alongside degraded output.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Diagnostic {
    /// Problem category.
    pub kind: DiagnosticKind,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic and emit it as a `tracing` warning.
    pub fn warn(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(?kind, "{message}");
        Self { kind, message }
    }

    /// Build a diagnostic logged at debug level. Used on per-frame paths that would otherwise
    /// repeat the same warning for every frame.
    pub fn quiet(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(?kind, "{message}");
        Self { kind, message }
    }
}
