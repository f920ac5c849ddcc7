#![deny(unreachable_patterns)]
//! Automatic moment detection for video highlight extraction.
//!
//! This crate provides:
//! - Audio energy analysis with prominence-based peak picking
//! - Scene change detection over sampled frames
//! - Candidate generation across detection tiers (audio, scene, regular)
//! - Greedy interval scheduling with a minimum-gap constraint and backfill
//! - A `MomentDetector` facade that runs the whole pipeline in one call
//!
//! Detection degrades instead of aborting: a missing audio track, a frame
//! that fails to decode, or a signal with nothing interesting in it all
//! fall back to evenly spaced windows. The only hard failures are contract
//! violations (bad configuration, unreadable source, degenerate signal).
//!
//! ```text
//! SignalSource
//!   ├─ audio samples ─ AudioEnergyAnalyzer ─ candidates @ 1.0
//!   ├─ frames ──────── SceneChangeDetector ─ candidates @ 0.8
//!   └─ duration ────── centered windows ──── candidates @ 0.5
//!                               │
//!                     CandidateGenerator (ranked pool)
//!                               │
//!                     IntervalScheduler (greedy + backfill)
//!                               │
//!                        DetectedMoments
//! ```

pub mod audio_energy;
pub mod candidates;
pub mod config;
pub mod detector;
pub mod equal_divide;
pub mod error;
pub mod peaks;
pub mod scene_change;
pub mod scheduler;
pub mod source;

// Pipeline facade
pub use detector::MomentDetector;

// Configuration
pub use config::{AudioPeakConfig, MomentConfig, SceneChangeConfig};

// Stage building blocks
pub use audio_energy::{energy_curve, AudioEnergyAnalyzer, EnergyPoint};
pub use candidates::{Candidate, CandidateGenerator};
pub use equal_divide::{centered_windows, divide_equally};
pub use peaks::{find_peaks, Peak};
pub use scene_change::{SceneChangeDetector, SceneEvent};
pub use scheduler::{IntervalScheduler, ScheduleOutcome};

// Source abstraction
pub use source::{AudioBuffer, FrameBuffer, SignalSource, VideoSignal};

// Errors
pub use error::{DetectError, DetectResult, SourceError};

#[cfg(feature = "debug-signals")]
pub use audio_energy::dump_energy_curve;
