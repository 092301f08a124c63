//! Narration audio: probing, decoding and amplitude.

/// PCM container and envelope follower.
pub mod amplitude;
/// `ffprobe`/`ffmpeg` helpers.
pub mod media;
