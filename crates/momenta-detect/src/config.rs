//! Configuration for moment detection.
//!
//! The defaults are tuned for 30-second social clips from longform video.
//! Invalid values are rejected by [`MomentConfig::validate`] before any
//! analyzer runs; setters store what they are given so a bad value surfaces
//! as an error instead of being silently corrected.

use serde::{Deserialize, Serialize};

use momenta_models::DetectionMethod;

use crate::error::{DetectError, DetectResult};

/// Audio peak analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioPeakConfig {
    /// Minimum peak prominence on the normalized loudness curve (0-1,
    /// exclusive).
    ///
    /// - Lower values (0.05): more peaks, including modest volume bumps
    /// - Default (0.1): clearly dominant peaks
    /// - Higher values (0.2+): only the loudest moments of the video
    pub prominence: f64,
}

impl Default for AudioPeakConfig {
    fn default() -> Self {
        Self { prominence: 0.1 }
    }
}

/// Scene-change detection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneChangeConfig {
    /// Mean per-pixel intensity difference that counts as a scene change.
    ///
    /// Frames are compared on 8-bit values, so useful thresholds sit well
    /// below 255.
    /// - Lower values (20): hard cuts and strong camera moves
    /// - Default (30): hard cuts only
    /// - Higher values (45+): only drastic visual jumps
    pub threshold: f64,

    /// Minimum seconds between two recorded scene events.
    ///
    /// Suppresses event bursts during rapid cutting; also means no event can
    /// be recorded earlier than this far into the video.
    pub min_scene_duration: f64,
}

impl Default for SceneChangeConfig {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            min_scene_duration: 2.0,
        }
    }
}

/// Configuration for one detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentConfig {
    /// Detection strategy.
    pub method: DetectionMethod,

    /// How many intervals to return. The run may return fewer when the
    /// duration cannot support the count under `min_gap`.
    pub num_clips: u32,

    /// Target length of each interval in seconds.
    pub clip_duration: f64,

    /// Minimum separation between two selected intervals in seconds.
    pub min_gap: f64,

    /// Audio peak analysis parameters.
    pub audio: AudioPeakConfig,

    /// Scene-change detection parameters.
    pub scene: SceneChangeConfig,
}

impl Default for MomentConfig {
    fn default() -> Self {
        Self {
            method: DetectionMethod::Smart,
            num_clips: 5,
            clip_duration: 30.0,
            min_gap: 5.0,
            audio: AudioPeakConfig::default(),
            scene: SceneChangeConfig::default(),
        }
    }
}

impl MomentConfig {
    /// Create a configuration that surfaces more, shorter-spaced moments.
    pub fn aggressive() -> Self {
        Self {
            min_gap: 2.0,
            audio: AudioPeakConfig { prominence: 0.05 },
            scene: SceneChangeConfig {
                threshold: 20.0,
                min_scene_duration: 1.0,
            },
            ..Self::default()
        }
    }

    /// Create a configuration that only reacts to strong signals.
    pub fn conservative() -> Self {
        Self {
            min_gap: 10.0,
            audio: AudioPeakConfig { prominence: 0.2 },
            scene: SceneChangeConfig {
                threshold: 45.0,
                min_scene_duration: 4.0,
            },
            ..Self::default()
        }
    }

    /// Builder-style setter for the detection method.
    pub fn with_method(mut self, method: DetectionMethod) -> Self {
        self.method = method;
        self
    }

    /// Builder-style setter for the interval count.
    pub fn with_num_clips(mut self, num_clips: u32) -> Self {
        self.num_clips = num_clips;
        self
    }

    /// Builder-style setter for the target interval length.
    pub fn with_clip_duration(mut self, seconds: f64) -> Self {
        self.clip_duration = seconds;
        self
    }

    /// Builder-style setter for the minimum gap between intervals.
    pub fn with_min_gap(mut self, seconds: f64) -> Self {
        self.min_gap = seconds;
        self
    }

    /// Builder-style setter for the audio peak prominence threshold.
    pub fn with_prominence(mut self, prominence: f64) -> Self {
        self.audio.prominence = prominence;
        self
    }

    /// Builder-style setter for the scene-change threshold.
    pub fn with_scene_threshold(mut self, threshold: f64) -> Self {
        self.scene.threshold = threshold;
        self
    }

    /// Builder-style setter for the minimum scene duration.
    pub fn with_min_scene_duration(mut self, seconds: f64) -> Self {
        self.scene.min_scene_duration = seconds;
        self
    }

    /// Reject contract-violating values with a descriptive error.
    ///
    /// The comparisons are written so that NaN fails them.
    pub fn validate(&self) -> DetectResult<()> {
        if self.num_clips == 0 {
            return Err(DetectError::invalid_config("num_clips must be at least 1"));
        }
        if !(self.clip_duration > 0.0 && self.clip_duration.is_finite()) {
            return Err(DetectError::invalid_config(format!(
                "clip_duration must be positive and finite, got {}",
                self.clip_duration
            )));
        }
        if !(self.min_gap >= 0.0 && self.min_gap.is_finite()) {
            return Err(DetectError::invalid_config(format!(
                "min_gap must be non-negative and finite, got {}",
                self.min_gap
            )));
        }
        if !(self.audio.prominence > 0.0 && self.audio.prominence < 1.0) {
            return Err(DetectError::invalid_config(format!(
                "prominence must be in (0, 1), got {}",
                self.audio.prominence
            )));
        }
        if !(self.scene.threshold > 0.0 && self.scene.threshold.is_finite()) {
            return Err(DetectError::invalid_config(format!(
                "scene threshold must be positive and finite, got {}",
                self.scene.threshold
            )));
        }
        if !(self.scene.min_scene_duration > 0.0 && self.scene.min_scene_duration.is_finite()) {
            return Err(DetectError::invalid_config(format!(
                "min_scene_duration must be positive and finite, got {}",
                self.scene.min_scene_duration
            )));
        }
        Ok(())
    }
}
