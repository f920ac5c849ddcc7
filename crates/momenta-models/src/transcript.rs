//! Transcript segments and window rebasing.
//!
//! Transcription itself is an external collaborator; these types carry its
//! timestamped output so the export side can attach captions to each selected
//! interval.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time_range::TimeRange;

/// One timestamped piece of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Start time in seconds on the source timeline.
    pub start: f64,
    /// End time in seconds on the source timeline.
    pub end: f64,
    /// Spoken text for this segment.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Segment length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Select the segments that fall entirely inside `window` and rebase them to
/// the window's local timeline (the window start becomes `t = 0`).
///
/// Segments touching the window edges are kept; segments crossing either edge
/// are dropped rather than truncated.
pub fn segments_in_window(
    segments: &[TranscriptSegment],
    window: TimeRange,
) -> Vec<TranscriptSegment> {
    segments
        .iter()
        .filter(|s| s.start >= window.start && s.end <= window.end)
        .map(|s| TranscriptSegment {
            start: s.start - window.start,
            end: s.end - window.start,
            text: s.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(5.0, 8.0, "before the window"),
            TranscriptSegment::new(10.0, 13.0, "at the left edge"),
            TranscriptSegment::new(15.0, 18.0, "fully inside"),
            TranscriptSegment::new(27.0, 30.0, "at the right edge"),
            TranscriptSegment::new(28.0, 32.0, "crosses the right edge"),
            TranscriptSegment::new(40.0, 44.0, "after the window"),
        ]
    }

    #[test]
    fn test_keeps_contained_segments_only() {
        let window = TimeRange::new(10.0, 30.0);
        let clipped = segments_in_window(&make_segments(), window);

        let texts: Vec<&str> = clipped.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["at the left edge", "fully inside", "at the right edge"]
        );
    }

    #[test]
    fn test_rebases_to_window_start() {
        let window = TimeRange::new(10.0, 30.0);
        let clipped = segments_in_window(&make_segments(), window);

        assert!((clipped[0].start - 0.0).abs() < 1e-9);
        assert!((clipped[0].end - 3.0).abs() < 1e-9);
        assert!((clipped[2].start - 17.0).abs() < 1e-9);
        assert!((clipped[2].end - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_preserves_segment_durations() {
        let window = TimeRange::new(10.0, 30.0);
        let clipped = segments_in_window(&make_segments(), window);
        for segment in &clipped {
            assert!((segment.duration() - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_input() {
        let window = TimeRange::new(0.0, 10.0);
        assert!(segments_in_window(&[], window).is_empty());
    }
}
