//! Detection method and candidate source vocabulary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Strategy used to locate highlight moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Fuse audio peaks, scene changes, and regular spacing into one
    /// scored candidate pool (default).
    #[default]
    Smart,
    /// Audio loudness peaks only.
    AudioPeaks,
    /// Visual scene changes only.
    SceneChange,
    /// Evenly spaced windows, no signal analysis.
    Equal,
}

impl DetectionMethod {
    /// All methods, in documentation order.
    pub const ALL: [DetectionMethod; 4] = [
        DetectionMethod::Smart,
        DetectionMethod::AudioPeaks,
        DetectionMethod::SceneChange,
        DetectionMethod::Equal,
    ];

    /// Returns the method as a string for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::AudioPeaks => "audio_peaks",
            Self::SceneChange => "scene_change",
            Self::Equal => "equal",
        }
    }
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which analyzer proposed a candidate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Window centered on an audio loudness peak.
    Audio,
    /// Window expanded around a scene-change event.
    Scene,
    /// Synthetic evenly spaced window.
    Regular,
}

impl CandidateSource {
    /// Returns the source as a string for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Scene => "scene",
            Self::Regular => "regular",
        }
    }
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
