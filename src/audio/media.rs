use std::{path::Path, time::Duration};

use crate::{
    audio::amplitude::AudioPcm,
    foundation::error::{FramecueError, FramecueResult},
};

/// Sample rate used when decoding narration tracks for amplitude analysis.
pub const ANALYSIS_SAMPLE_RATE: u32 = 48_000;

/// Default upper bound on a single `ffprobe` call.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Container duration of `path` in seconds, as reported by `ffprobe`.
///
/// The child process is killed once `timeout` elapses.
#[cfg(feature = "media-ffmpeg")]
pub fn probe_duration_secs(path: &Path, timeout: Duration) -> FramecueResult<f64> {
    use std::{io::Read, process::Stdio, time::Instant};

    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let mut child = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "json",
        ])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| FramecueError::media(format!("failed to run ffprobe: {e}")))?;

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if started.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(FramecueError::media(format!(
                    "ffprobe timed out after {timeout:?} for '{}'",
                    path.display()
                )));
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(5)),
            Err(e) => {
                return Err(FramecueError::media(format!("ffprobe wait failed: {e}")));
            }
        }
    };

    let mut stdout = Vec::new();
    let mut stderr = String::new();
    if let Some(mut out) = child.stdout.take() {
        out.read_to_end(&mut stdout)
            .map_err(|e| FramecueError::media(format!("ffprobe stdout read failed: {e}")))?;
    }
    if let Some(mut err) = child.stderr.take() {
        let _ = err.read_to_string(&mut stderr);
    }

    if !status.success() {
        return Err(FramecueError::media(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            stderr.trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&stdout)
        .map_err(|e| FramecueError::media(format!("ffprobe json parse failed: {e}")))?;
    let secs = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| FramecueError::media("ffprobe reported no duration"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(FramecueError::media(format!(
            "ffprobe reported invalid duration {secs} for '{}'",
            path.display()
        )));
    }
    Ok(secs)
}

/// Probe the container duration of `path`. Always fails without the `media-ffmpeg` feature.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_duration_secs(_path: &Path, _timeout: Duration) -> FramecueResult<f64> {
    Err(FramecueError::media(
        "probing asset durations requires the 'media-ffmpeg' feature",
    ))
}

/// Decode the audio track of `path` to interleaved stereo f32 PCM with `ffmpeg`.
///
/// Files without an audio stream decode to empty PCM.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> FramecueResult<AudioPcm> {
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| FramecueError::media(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        if msg.contains("matches no streams")
            || msg.contains("Output file #0 does not contain any stream")
        {
            return Ok(AudioPcm::silent(sample_rate, 2));
        }
        return Err(FramecueError::media(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(FramecueError::media(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let interleaved_f32 = out
        .stdout
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32,
    })
}

/// Decode the audio track of `path`. Always fails without the `media-ffmpeg` feature.
#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_audio_f32_stereo(_path: &Path, _sample_rate: u32) -> FramecueResult<AudioPcm> {
    Err(FramecueError::media(
        "decoding audio requires the 'media-ffmpeg' feature",
    ))
}
