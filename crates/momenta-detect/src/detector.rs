//! The detection pipeline facade.
//!
//! `MomentDetector` wires the stages together: validate the configuration,
//! probe the source, assemble the candidate pool, schedule a conflict-free
//! subset, and attach the run report. One call, one run; nothing is cached
//! or shared across invocations.

use tracing::info;

use momenta_models::{CandidateSource, DetectedMoments, DetectionReport};

use crate::candidates::{Candidate, CandidateGenerator};
use crate::config::MomentConfig;
use crate::error::DetectResult;
use crate::scheduler::IntervalScheduler;
use crate::source::SignalSource;

/// Runs the full auto-detection pipeline over one video.
///
/// The detector is cheap to construct and stateless between runs; it is safe
/// to call [`detect`](MomentDetector::detect) from multiple threads on
/// different sources.
#[derive(Debug, Clone, Default)]
pub struct MomentDetector {
    config: MomentConfig,
}

impl MomentDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: MomentConfig) -> Self {
        Self { config }
    }

    /// The configuration this detector runs with.
    pub fn config(&self) -> &MomentConfig {
        &self.config
    }

    /// Run one detection pass and return the selected intervals plus the
    /// run report.
    ///
    /// Fails only on contract violations: an invalid configuration, a
    /// failing probe, or a degenerate probed signal. Missing audio, failed
    /// frame decodes, and empty detections all degrade inside the pipeline
    /// and still produce a result.
    pub fn detect(&self, source: &dyn SignalSource) -> DetectResult<DetectedMoments> {
        self.config.validate()?;

        let signal = source.probe()?;
        signal.validate()?;

        let candidates = CandidateGenerator::new(&self.config).generate(source, &signal);

        let scheduler = IntervalScheduler {
            num_clips: self.config.num_clips,
            clip_duration: self.config.clip_duration,
            min_gap: self.config.min_gap,
        };
        let outcome = scheduler.schedule(&candidates, signal.duration);

        let report = DetectionReport {
            method_used: self.config.method,
            audio_candidates: count_source(&candidates, CandidateSource::Audio),
            scene_candidates: count_source(&candidates, CandidateSource::Scene),
            regular_candidates: count_source(&candidates, CandidateSource::Regular),
            requested: self.config.num_clips,
            returned: outcome.intervals.len() as u32,
            backfilled: outcome.backfilled,
        };

        info!(
            method = %report.method_used,
            duration_sec = signal.duration,
            candidates = report.total_candidates(),
            requested = report.requested,
            returned = report.returned,
            backfilled = report.backfilled,
            "Moment detection complete"
        );

        Ok(DetectedMoments {
            intervals: outcome.intervals,
            report,
        })
    }
}

fn count_source(candidates: &[Candidate], source: CandidateSource) -> u32 {
    candidates.iter().filter(|c| c.source == source).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use momenta_models::DetectionMethod;

    use crate::error::{DetectError, SourceError};
    use crate::source::{AudioBuffer, FrameBuffer, VideoSignal};

    /// Source that counts probe calls and can be told to fail them.
    struct ProbeSpy {
        probes: Cell<u32>,
        fail_probe: bool,
        duration: f64,
    }

    impl ProbeSpy {
        fn new(duration: f64) -> Self {
            Self {
                probes: Cell::new(0),
                fail_probe: false,
                duration,
            }
        }
    }

    impl SignalSource for ProbeSpy {
        fn probe(&self) -> Result<VideoSignal, SourceError> {
            self.probes.set(self.probes.get() + 1);
            if self.fail_probe {
                return Err(SourceError::probe("container unreadable"));
            }
            Ok(VideoSignal {
                duration: self.duration,
                sample_rate: 1_000,
                fps: 30.0,
                width: 8,
                height: 8,
            })
        }

        fn audio_samples(&self, _sample_rate: u32) -> Result<AudioBuffer, SourceError> {
            Err(SourceError::NoAudioTrack)
        }

        fn frame_at(&self, _time: f64) -> Result<FrameBuffer, SourceError> {
            Ok(FrameBuffer::new(8, 8, vec![40; 64]))
        }
    }

    #[test]
    fn test_invalid_config_fails_before_probe() {
        let source = ProbeSpy::new(100.0);
        let detector = MomentDetector::new(MomentConfig::default().with_num_clips(0));

        let err = detector.detect(&source).unwrap_err();
        assert!(matches!(err, DetectError::InvalidConfig(_)));
        assert_eq!(source.probes.get(), 0, "config must be checked first");
    }

    #[test]
    fn test_probe_failure_propagates() {
        let mut source = ProbeSpy::new(100.0);
        source.fail_probe = true;

        let err = MomentDetector::default().detect(&source).unwrap_err();
        assert!(matches!(err, DetectError::Source(SourceError::Probe { .. })));
    }

    #[test]
    fn test_degenerate_signal_rejected() {
        let source = ProbeSpy::new(0.0);

        let err = MomentDetector::default().detect(&source).unwrap_err();
        assert!(matches!(err, DetectError::InvalidSignal(_)));
    }

    #[test]
    fn test_report_reflects_pool_and_selection() {
        // No audio, static frames: the smart pool is the doubled audio
        // fallback plus the regular tier, and the quota is met.
        let source = ProbeSpy::new(100.0);
        let config = MomentConfig::default()
            .with_method(DetectionMethod::Smart)
            .with_num_clips(4)
            .with_clip_duration(20.0);

        let moments = MomentDetector::new(config).detect(&source).unwrap();
        let report = moments.report;

        assert_eq!(report.method_used, DetectionMethod::Smart);
        assert_eq!(report.audio_candidates, 8);
        assert_eq!(report.scene_candidates, 0);
        assert_eq!(report.regular_candidates, 4);
        assert_eq!(report.requested, 4);
        assert_eq!(report.returned, 4);
        assert_eq!(report.backfilled, 0);
        assert!(!report.is_short());
    }

    #[test]
    fn test_probe_called_once_per_run() {
        let source = ProbeSpy::new(100.0);
        let detector = MomentDetector::default();

        detector.detect(&source).unwrap();
        assert_eq!(source.probes.get(), 1);

        detector.detect(&source).unwrap();
        assert_eq!(source.probes.get(), 2);
    }
}
