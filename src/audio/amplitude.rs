use crate::foundation::core::{Fps, FrameIndex};

/// Decoded PCM audio, interleaved f32 samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioPcm {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved samples, `channels` values per sample frame.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Empty PCM.
    pub fn silent(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            interleaved_f32: Vec::new(),
        }
    }

    /// Number of sample frames (one value per channel each).
    pub fn sample_frames(&self) -> usize {
        match self.channels {
            0 => 0,
            ch => self.interleaved_f32.len() / usize::from(ch),
        }
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_frames() as f64 / f64::from(self.sample_rate)
    }

    /// First sample frame that belongs to video `frame`.
    pub fn frame_to_sample(&self, frame: FrameIndex, fps: Fps) -> usize {
        let num = u128::from(frame.0) * u128::from(self.sample_rate) * u128::from(fps.den);
        let den = u128::from(fps.num).max(1);
        usize::try_from(num / den).unwrap_or(usize::MAX)
    }
}

/// Envelope follower parameters for [`smoothed_amplitude`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AmplitudeSmoothing {
    /// Blend factor toward a louder input, in `(0, 1]`.
    pub attack: f64,
    /// Blend factor toward a quieter input, in `(0, 1]`.
    pub release: f64,
    /// Number of preceding frames folded into the envelope.
    pub history_frames: u64,
}

impl Default for AmplitudeSmoothing {
    fn default() -> Self {
        Self {
            attack: 0.6,
            release: 0.15,
            history_frames: 90,
        }
    }
}

/// Root-mean-square level of all samples (all channels) covering video `frame`.
pub fn frame_rms(pcm: &AudioPcm, fps: Fps, frame: FrameIndex) -> f64 {
    let ch = usize::from(pcm.channels);
    if ch == 0 {
        return 0.0;
    }
    let total = pcm.sample_frames();
    let start = pcm.frame_to_sample(frame, fps).min(total);
    let end = pcm
        .frame_to_sample(FrameIndex(frame.0.saturating_add(1)), fps)
        .min(total);
    if end <= start {
        return 0.0;
    }
    let window = &pcm.interleaved_f32[start * ch..end * ch];
    let sum_sq: f64 = window.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum_sq / window.len() as f64).sqrt()
}

/// Attack/release envelope of [`frame_rms`] at `frame`.
///
/// Folds over the `history_frames` frames preceding `frame` (and `frame` itself) starting from
/// silence, so the value depends only on its arguments.
pub fn smoothed_amplitude(
    pcm: &AudioPcm,
    fps: Fps,
    frame: FrameIndex,
    params: AmplitudeSmoothing,
) -> f64 {
    let attack = params.attack.clamp(0.0, 1.0);
    let release = params.release.clamp(0.0, 1.0);
    let first = frame.0.saturating_sub(params.history_frames);

    (first..=frame.0).fold(0.0, |env, f| {
        let level = frame_rms(pcm, fps, FrameIndex(f));
        let k = if level > env { attack } else { release };
        env + k * (level - env)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/amplitude.rs"]
mod tests;
