//! Candidate generation and scoring.
//!
//! Each detection method maps to one or more generator tiers. A tier proposes
//! time windows tagged with its source and a fixed priority score; the smart
//! method unions all three tiers into a single pool ranked by score. Ranking
//! uses a stable sort, so windows with equal scores keep their generation
//! order: audio before scene before regular, chronological within a tier.

use tracing::debug;

use momenta_models::{CandidateSource, DetectionMethod, TimeRange};

use crate::audio_energy::AudioEnergyAnalyzer;
use crate::config::MomentConfig;
use crate::equal_divide::{centered_windows, divide_equally};
use crate::scene_change::SceneChangeDetector;
use crate::source::{SignalSource, VideoSignal};

/// Priority score for windows centered on audio loudness peaks.
pub(crate) const AUDIO_SCORE: f32 = 1.0;
/// Priority score for windows expanded around scene changes.
pub(crate) const SCENE_SCORE: f32 = 0.8;
/// Priority score for synthetic evenly spaced windows.
pub(crate) const REGULAR_SCORE: f32 = 0.5;

/// Smart mode requests twice the needed audio windows so the scheduler has
/// alternatives when high-scoring windows conflict.
const SMART_AUDIO_POOL_FACTOR: u32 = 2;
/// Permissive prominence bar for the smart-mode audio pool.
const SMART_AUDIO_PROMINENCE: f64 = 0.05;
/// Smart-mode scene threshold, lower than the standalone default so softer
/// cuts still contribute candidates.
const SMART_SCENE_THRESHOLD: f64 = 25.0;

/// A scored, source-tagged time window proposed for selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The proposed window.
    pub range: TimeRange,
    /// Priority score; the scheduler visits higher scores first.
    pub score: f32,
    /// Which tier proposed the window.
    pub source: CandidateSource,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(range: TimeRange, score: f32, source: CandidateSource) -> Self {
        Self {
            range,
            score,
            source,
        }
    }
}

/// Runs the analyzers that apply to the configured detection method and
/// merges their proposals into one ranked pool.
pub struct CandidateGenerator<'a> {
    config: &'a MomentConfig,
}

impl<'a> CandidateGenerator<'a> {
    /// Create a generator for one run.
    pub fn new(config: &'a MomentConfig) -> Self {
        Self { config }
    }

    /// Produce the ranked candidate pool for the configured method.
    ///
    /// The pool may be larger than `num_clips` (smart mode intentionally
    /// overshoots) or smaller (a quiet, static video in scene mode); the
    /// scheduler deals with both.
    pub fn generate(&self, source: &dyn SignalSource, signal: &VideoSignal) -> Vec<Candidate> {
        let cfg = self.config;

        let mut pool = match cfg.method {
            DetectionMethod::Smart => {
                let mut pool = self.audio_tier(
                    source,
                    signal,
                    cfg.num_clips * SMART_AUDIO_POOL_FACTOR,
                    SMART_AUDIO_PROMINENCE,
                );
                pool.extend(self.scene_tier(source, signal, SMART_SCENE_THRESHOLD));
                pool.extend(self.regular_tier(signal));
                pool
            }
            DetectionMethod::AudioPeaks => {
                self.audio_tier(source, signal, cfg.num_clips, cfg.audio.prominence)
            }
            DetectionMethod::SceneChange => self.scene_tier(source, signal, cfg.scene.threshold),
            DetectionMethod::Equal => {
                divide_equally(signal.duration, cfg.clip_duration, cfg.num_clips)
                    .into_iter()
                    .map(|range| Candidate::new(range, REGULAR_SCORE, CandidateSource::Regular))
                    .collect()
            }
        };

        // Stable, so equal scores keep their generation order.
        pool.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            method = %cfg.method,
            candidates = pool.len(),
            "Candidate pool assembled"
        );
        pool
    }

    /// Audio tier: windows centered on loudness peaks, equal-division
    /// fallback when the signal gives nothing.
    fn audio_tier(
        &self,
        source: &dyn SignalSource,
        signal: &VideoSignal,
        num_candidates: u32,
        prominence: f64,
    ) -> Vec<Candidate> {
        let analyzer = AudioEnergyAnalyzer {
            min_clip_duration: self.config.clip_duration / 2.0,
            max_clip_duration: self.config.clip_duration,
            num_candidates,
            prominence,
        };

        analyzer
            .analyze(source, signal)
            .into_iter()
            .map(|range| Candidate::new(range, AUDIO_SCORE, CandidateSource::Audio))
            .collect()
    }

    /// Scene tier: each detected boundary expands into a window centered on
    /// it. An unavailable or static visual signal contributes nothing.
    fn scene_tier(
        &self,
        source: &dyn SignalSource,
        signal: &VideoSignal,
        threshold: f64,
    ) -> Vec<Candidate> {
        let detector = SceneChangeDetector {
            threshold,
            min_scene_duration: self.config.scene.min_scene_duration,
        };

        detector
            .detect(source, signal)
            .into_iter()
            .map(|event| {
                let range = expand_scene_event(event.time, self.config.clip_duration, signal.duration);
                Candidate::new(range, SCENE_SCORE, CandidateSource::Scene)
            })
            .collect()
    }

    /// Regular tier for smart mode: windows centered on evenly spaced
    /// interior points, clear of the video edges.
    fn regular_tier(&self, signal: &VideoSignal) -> Vec<Candidate> {
        centered_windows(signal.duration, self.config.clip_duration, self.config.num_clips)
            .into_iter()
            .map(|range| Candidate::new(range, REGULAR_SCORE, CandidateSource::Regular))
            .collect()
    }
}

/// Expand a scene boundary at `time` into a window of up to `clip_duration`
/// seconds centered on it, clamped into `[0, duration]`.
///
/// Near either edge the window shrinks rather than shifting; a cut two
/// seconds in should not produce a window that starts mid-scene.
fn expand_scene_event(time: f64, clip_duration: f64, duration: f64) -> TimeRange {
    let start = (time - clip_duration / 2.0).max(0.0);
    let end = (time + clip_duration / 2.0).min(duration);
    TimeRange::new(start, end)
}
