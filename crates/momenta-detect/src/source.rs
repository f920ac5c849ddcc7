//! The decoding collaborator seam.
//!
//! Decoding, seeking, and resampling are not this crate's job. A
//! [`SignalSource`] hands the pipeline pre-decoded material on request:
//! stream-level facts once per run, audio samples at a requested rate, and
//! single frames at arbitrary timestamps. Everything here is synchronous;
//! extraction calls block the calling thread.

use serde::{Deserialize, Serialize};

use crate::error::{DetectError, DetectResult, SourceError};

/// Stream-level facts about one video, probed once per detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoSignal {
    /// Duration in seconds
    pub duration: f64,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl VideoSignal {
    /// Reject degenerate signals before any analyzer runs.
    pub(crate) fn validate(&self) -> DetectResult<()> {
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(DetectError::invalid_signal(format!(
                "duration must be positive and finite, got {}",
                self.duration
            )));
        }
        if self.sample_rate == 0 {
            return Err(DetectError::invalid_signal("sample rate must be positive"));
        }
        if !(self.fps > 0.0 && self.fps.is_finite()) {
            return Err(DetectError::invalid_signal(format!(
                "fps must be positive and finite, got {}",
                self.fps
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(DetectError::invalid_signal(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Decoded audio, possibly interleaved across channels.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Channel count; samples are interleaved when above one.
    pub channels: u16,
    /// Sample data in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a single-channel buffer.
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            channels: 1,
            samples,
        }
    }

    /// Create an interleaved multi-channel buffer.
    pub fn interleaved(channels: u16, samples: Vec<f32>) -> Self {
        Self { channels, samples }
    }

    /// Extract the first channel. Zero-channel buffers are read as mono.
    pub fn first_channel(&self) -> Vec<f32> {
        if self.channels <= 1 {
            return self.samples.clone();
        }
        let stride = usize::from(self.channels);
        self.samples.iter().step_by(stride).copied().collect()
    }
}

/// One decoded frame as a tightly packed 8-bit pixel grid.
///
/// The channel layout does not matter to the pipeline; consecutive frames
/// from one source must simply use the same layout and dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Packed pixel data
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new frame buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// The external media-decoding collaborator.
///
/// One detection run calls `probe` once, then pulls audio samples and frames
/// as its analyzers need them. Implementations decide their own concurrency
/// discipline; the pipeline never caches across runs.
pub trait SignalSource {
    /// Stream-level facts for this video.
    fn probe(&self) -> Result<VideoSignal, SourceError>;

    /// Full-length audio resampled to `sample_rate`.
    ///
    /// Returns [`SourceError::NoAudioTrack`] when the video carries no audio.
    fn audio_samples(&self, sample_rate: u32) -> Result<AudioBuffer, SourceError>;

    /// The frame nearest to `time` seconds.
    fn frame_at(&self, time: f64) -> Result<FrameBuffer, SourceError>;
}
