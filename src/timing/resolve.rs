use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use rayon::prelude::*;

use crate::{
    audio::media::{DEFAULT_PROBE_TIMEOUT, probe_duration_secs},
    foundation::diag::{Diagnostic, DiagnosticKind},
    foundation::error::{FramecueError, FramecueResult},
};

/// Where an event's duration comes from.
///
/// Deserializes from a bare number, `{"secs": 2.5}` or `{"asset": "narration/01.mp3"}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DurationSource {
    /// Duration in seconds, written as a bare number.
    Bare(f64),
    /// Duration in seconds.
    Secs {
        /// Seconds.
        secs: f64,
    },
    /// Duration of a media asset, resolved through a [`DurationResolver`].
    Asset {
        /// Asset path, relative to the resolver's base directory.
        asset: PathBuf,
    },
}

impl DurationSource {
    /// Literal duration, if this source does not need resolution.
    pub fn literal_secs(&self) -> Option<f64> {
        match self {
            Self::Bare(s) | Self::Secs { secs: s } => Some(*s),
            Self::Asset { .. } => None,
        }
    }
}

impl From<f64> for DurationSource {
    fn from(secs: f64) -> Self {
        Self::Secs { secs }
    }
}

/// Answers "how long is this asset, in seconds".
pub trait DurationResolver: Send + Sync {
    /// Duration of `path` in seconds. Failures are recovered by the caller.
    fn resolve(&self, path: &Path) -> FramecueResult<f64>;
}

/// Resolver backed by a fixed table of known durations.
#[derive(Clone, Debug, Default)]
pub struct StaticDurations {
    by_path: BTreeMap<PathBuf, f64>,
}

impl StaticDurations {
    /// Empty table; every lookup fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn with(mut self, path: impl Into<PathBuf>, secs: f64) -> Self {
        self.by_path.insert(path.into(), secs);
        self
    }
}

impl DurationResolver for StaticDurations {
    fn resolve(&self, path: &Path) -> FramecueResult<f64> {
        self.by_path
            .get(path)
            .copied()
            .ok_or_else(|| FramecueError::timing(format!("unknown asset '{}'", path.display())))
    }
}

/// Resolver that probes media files with the system `ffprobe` binary.
#[derive(Clone, Debug)]
pub struct FfprobeDurationResolver {
    base_dir: PathBuf,
    timeout: Duration,
}

impl FfprobeDurationResolver {
    /// Probe assets relative to `base_dir` with the default timeout.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Override the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl DurationResolver for FfprobeDurationResolver {
    fn resolve(&self, path: &Path) -> FramecueResult<f64> {
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        probe_duration_secs(&full, self.timeout)
    }
}

/// Durations in seconds for every event plus the fallbacks that were applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedDurations {
    /// One entry per event; always finite and positive.
    pub secs: Vec<f64>,
    /// One diagnostic per event that fell back.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve every event duration, probing asset-backed ones in parallel.
///
/// Literal durations that are not finite or not positive, and assets the resolver cannot answer
/// for, are replaced by `fallback_secs` and reported as [`DiagnosticKind::DurationFallback`].
#[tracing::instrument(skip(sources, resolver), fields(events = sources.len()))]
pub fn resolve_event_durations(
    sources: &[DurationSource],
    resolver: &dyn DurationResolver,
    fallback_secs: f64,
) -> ResolvedDurations {
    let results: Vec<(f64, Option<Diagnostic>)> = sources
        .par_iter()
        .enumerate()
        .map(|(idx, source)| {
            let (raw, origin) = match source {
                DurationSource::Asset { asset } => match resolver.resolve(asset) {
                    Ok(secs) => (secs, format!("asset '{}'", asset.display())),
                    Err(e) => {
                        let diag = Diagnostic::warn(
                            DiagnosticKind::DurationFallback,
                            format!(
                                "event {idx}: could not resolve '{}' ({e}), using {fallback_secs}s",
                                asset.display()
                            ),
                        );
                        return (fallback_secs, Some(diag));
                    }
                },
                other => (other.literal_secs().unwrap_or(fallback_secs), "literal".to_owned()),
            };
            if raw.is_finite() && raw > 0.0 {
                (raw, None)
            } else {
                let diag = Diagnostic::warn(
                    DiagnosticKind::DurationFallback,
                    format!("event {idx}: invalid {origin} duration {raw}, using {fallback_secs}s"),
                );
                (fallback_secs, Some(diag))
            }
        })
        .collect();

    let mut out = ResolvedDurations::default();
    for (secs, diag) in results {
        out.secs.push(secs);
        out.diagnostics.extend(diag);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/timing/resolve.rs"]
mod tests;
