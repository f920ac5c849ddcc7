//! Error types for moment detection.

use thiserror::Error;

/// Result type for detection operations.
pub type DetectResult<T> = Result<T, DetectError>;

/// Failures reported by a [`SignalSource`](crate::source::SignalSource)
/// collaborator.
///
/// Only `Probe` is fatal to a detection run; the analyzers recover from the
/// other variants by degrading (equal-division fallback, empty event list).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("video has no audio track")]
    NoAudioTrack,

    #[error("audio sample extraction failed: {message}")]
    Samples { message: String },

    #[error("frame extraction failed at {time:.2}s: {message}")]
    Frame { time: f64, message: String },

    #[error("signal probe failed: {message}")]
    Probe { message: String },
}

impl SourceError {
    /// Create a sample extraction error.
    pub fn samples(message: impl Into<String>) -> Self {
        Self::Samples {
            message: message.into(),
        }
    }

    /// Create a frame extraction error.
    pub fn frame(time: f64, message: impl Into<String>) -> Self {
        Self::Frame {
            time,
            message: message.into(),
        }
    }

    /// Create a probe error.
    pub fn probe(message: impl Into<String>) -> Self {
        Self::Probe {
            message: message.into(),
        }
    }
}

/// Errors that can abort a detection run.
///
/// Detection degrades rather than aborts wherever possible; the only hard
/// failures are contract violations caught before any analyzer runs and a
/// failing probe (without a duration nothing can run).
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid video signal: {0}")]
    InvalidSignal(String),

    #[error("signal source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DetectError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an invalid-signal error.
    pub fn invalid_signal(message: impl Into<String>) -> Self {
        Self::InvalidSignal(message.into())
    }
}
