//! Detection run output and observability metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::detection::{CandidateSource, DetectionMethod};
use crate::time_range::TimeRange;

/// Metadata describing one detection run.
///
/// A run that returns fewer intervals than requested is not an error; this
/// report is how callers inspect the shortfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionReport {
    /// Detection method that produced the result.
    pub method_used: DetectionMethod,

    /// Candidate windows contributed by the audio analyzer.
    pub audio_candidates: u32,

    /// Candidate windows contributed by the scene-change detector.
    pub scene_candidates: u32,

    /// Candidate windows contributed by regular spacing.
    pub regular_candidates: u32,

    /// Number of intervals the caller asked for.
    pub requested: u32,

    /// Number of intervals actually returned.
    pub returned: u32,

    /// How many of the returned intervals came from the backfill pass.
    pub backfilled: u32,
}

impl DetectionReport {
    /// Total candidate windows across all sources.
    pub fn total_candidates(&self) -> u32 {
        self.audio_candidates + self.scene_candidates + self.regular_candidates
    }

    /// Candidate count for one source.
    pub fn candidates_for(&self, source: CandidateSource) -> u32 {
        match source {
            CandidateSource::Audio => self.audio_candidates,
            CandidateSource::Scene => self.scene_candidates,
            CandidateSource::Regular => self.regular_candidates,
        }
    }

    /// Returns true if the run could not satisfy the requested interval count.
    pub fn is_short(&self) -> bool {
        self.returned < self.requested
    }
}

/// The result of one detection run: the selected intervals plus run metadata.
///
/// Intervals are chronologically ordered, pairwise non-overlapping, and
/// separated by at least the configured minimum gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedMoments {
    /// Selected intervals, sorted by start time.
    pub intervals: Vec<TimeRange>,

    /// Run metadata for observability.
    pub report: DetectionReport,
}

impl DetectedMoments {
    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
