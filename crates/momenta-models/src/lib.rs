//! Shared data models for the Momenta detection core.
//!
//! This crate provides Serde-serializable types for:
//! - Time ranges selected by the detection pipeline
//! - Detection methods and candidate sources
//! - Per-run detection reports
//! - Timestamp parsing and formatting
//! - Transcript segments and window rebasing

pub mod detection;
pub mod report;
pub mod time_range;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use detection::{CandidateSource, DetectionMethod};
pub use report::{DetectedMoments, DetectionReport};
pub use time_range::TimeRange;
pub use timestamp::{format_seconds, parse_timestamp, TimestampError};
pub use transcript::{segments_in_window, TranscriptSegment};
