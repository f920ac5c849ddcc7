//! Time ranges on a video timeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::format_seconds;

/// A half-open-in-spirit `[start, end]` window on the video timeline, in
/// seconds from the start of the source.
///
/// The detection pipeline guarantees `0 <= start < end <= duration` for every
/// range it emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimeRange {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimeRange {
    /// Create a new time range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the range in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns true if `t` falls inside the range (inclusive on both ends).
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Returns true if `other` lies entirely inside this range.
    pub fn encloses(&self, other: &TimeRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Returns the range shifted by `offset` seconds.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            format_seconds(self.start),
            format_seconds(self.end)
        )
    }
}
