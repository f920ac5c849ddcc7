//! End-to-end detection pipeline tests.
//!
//! These run `MomentDetector` against fully synthetic sources, so every
//! expectation here is derived from the fixture by hand. The fixture plants
//! loud 0.5 s audio bursts and hard visual cuts at known times; everything
//! else is quiet and static.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use momenta_detect::{
    divide_equally, AudioBuffer, FrameBuffer, MomentConfig, MomentDetector, SignalSource,
    SourceError, VideoSignal,
};
use momenta_models::{DetectionMethod, TimeRange};

/// Deterministic source: quiet square-wave audio with loud bursts starting
/// at `peak_times`, flat frames that flip brightness at each of `cut_times`.
struct SyntheticVideo {
    signal: VideoSignal,
    peak_times: Vec<f64>,
    cut_times: Vec<f64>,
    has_audio: bool,
}

impl SyntheticVideo {
    fn new(duration: f64) -> Self {
        Self {
            signal: VideoSignal {
                duration,
                sample_rate: 1_000,
                fps: 30.0,
                width: 16,
                height: 9,
            },
            peak_times: Vec::new(),
            cut_times: Vec::new(),
            has_audio: true,
        }
    }

    fn with_peaks(mut self, peak_times: Vec<f64>) -> Self {
        self.peak_times = peak_times;
        self
    }

    fn with_cuts(mut self, cut_times: Vec<f64>) -> Self {
        self.cut_times = cut_times;
        self
    }

    fn without_audio(mut self) -> Self {
        self.has_audio = false;
        self
    }
}

impl SignalSource for SyntheticVideo {
    fn probe(&self) -> Result<VideoSignal, SourceError> {
        Ok(self.signal)
    }

    fn audio_samples(&self, sample_rate: u32) -> Result<AudioBuffer, SourceError> {
        if !self.has_audio {
            return Err(SourceError::NoAudioTrack);
        }
        let total = (self.signal.duration * f64::from(sample_rate)) as usize;
        let samples = (0..total)
            .map(|i| {
                let t = i as f64 / f64::from(sample_rate);
                let loud = self
                    .peak_times
                    .iter()
                    .any(|&peak| t >= peak && t < peak + 0.5);
                let amplitude = if loud { 0.9 } else { 0.02 };
                if i % 2 == 0 {
                    amplitude
                } else {
                    -amplitude
                }
            })
            .collect();
        Ok(AudioBuffer::mono(samples))
    }

    fn frame_at(&self, time: f64) -> Result<FrameBuffer, SourceError> {
        let cuts_before = self.cut_times.iter().filter(|&&c| c <= time).count();
        let brightness = if cuts_before % 2 == 0 { 30 } else { 200 };
        let pixels = vec![brightness; (self.signal.width * self.signal.height) as usize];
        Ok(FrameBuffer::new(self.signal.width, self.signal.height, pixels))
    }
}

fn assert_ranges(intervals: &[TimeRange], expected: &[(f64, f64)]) {
    assert_eq!(intervals.len(), expected.len(), "interval count mismatch");
    for (range, &(start, end)) in intervals.iter().zip(expected) {
        assert!(
            (range.start - start).abs() < 1e-6 && (range.end - end).abs() < 1e-6,
            "expected [{start}, {end}], got [{}, {}]",
            range.start,
            range.end
        );
    }
}

fn assert_selection_contract(intervals: &[TimeRange], duration: f64, num_clips: u32, min_gap: f64) {
    assert!(intervals.len() <= num_clips as usize, "over quota");
    for range in intervals {
        assert!(range.start >= -1e-6, "start before zero: {range}");
        assert!(range.end <= duration + 1e-6, "end past duration: {range}");
        assert!(range.start < range.end, "empty interval: {range}");
    }
    for pair in intervals.windows(2) {
        assert!(
            pair[0].end + min_gap <= pair[1].start + 1e-6,
            "gap violated between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

/// Test that smart detection prefers audio peaks, then scene changes, then
/// regular filler, and returns a gap-respecting chronological selection.
#[test]
fn test_smart_detection_end_to_end() {
    let source = SyntheticVideo::new(200.0)
        .with_peaks(vec![30.0, 90.0])
        .with_cuts(vec![150.0]);
    let config = MomentConfig::default()
        .with_num_clips(4)
        .with_clip_duration(20.0);
    let detector = MomentDetector::new(config);

    let moments = detector.detect(&source).unwrap();

    assert_eq!(moments.report.method_used, DetectionMethod::Smart);
    assert_eq!(moments.report.audio_candidates, 2);
    assert_eq!(moments.report.scene_candidates, 1);
    assert_eq!(moments.report.regular_candidates, 4);
    assert_eq!(moments.report.returned, 4);
    assert_eq!(moments.report.backfilled, 0);

    // The loudest windows must survive selection.
    assert_ranges(&moments.intervals[..2], &[(20.0, 40.0), (80.0, 100.0)]);
    assert_selection_contract(&moments.intervals, 200.0, 4, 5.0);
}

/// Test that a source with no usable signals degrades to the exact equal
/// division, run after run.
#[test]
fn test_signal_free_video_falls_back_deterministically() {
    let source = SyntheticVideo::new(100.0).without_audio();
    let config = MomentConfig::default()
        .with_num_clips(4)
        .with_clip_duration(20.0);
    let detector = MomentDetector::new(config);

    let first = detector.detect(&source).unwrap();
    let second = detector.detect(&source).unwrap();

    assert_ranges(
        &first.intervals,
        &[(0.0, 20.0), (25.0, 45.0), (50.0, 70.0), (75.0, 95.0)],
    );
    assert_eq!(first.intervals, divide_equally(100.0, 20.0, 4));
    assert_eq!(first, second);
    assert_eq!(first.report.returned, 4);
    assert!(!first.report.is_short());
}

/// Test audio-peaks mode end to end: windows centered on the bursts, edge
/// windows clamped into the video.
#[test]
fn test_audio_peaks_mode_centers_on_bursts() {
    let source = SyntheticVideo::new(60.0).with_peaks(vec![10.0, 40.0]);
    let config = MomentConfig::default()
        .with_method(DetectionMethod::AudioPeaks)
        .with_num_clips(2)
        .with_clip_duration(20.0);

    let moments = MomentDetector::new(config).detect(&source).unwrap();

    assert_eq!(moments.report.method_used, DetectionMethod::AudioPeaks);
    assert_eq!(moments.report.audio_candidates, 2);
    assert_eq!(moments.report.scene_candidates, 0);
    assert_eq!(moments.report.regular_candidates, 0);
    assert_ranges(&moments.intervals, &[(0.0, 20.0), (30.0, 50.0)]);
}

/// Test that scene-change mode returns a short result when one scene is all
/// there is and backfill cannot fit around it.
#[test]
fn test_scene_change_mode_reports_short_result() {
    let source = SyntheticVideo::new(60.0).with_cuts(vec![30.0]);
    let config = MomentConfig::default()
        .with_method(DetectionMethod::SceneChange)
        .with_num_clips(2)
        .with_clip_duration(20.0);

    let moments = MomentDetector::new(config).detect(&source).unwrap();

    assert_ranges(&moments.intervals, &[(20.0, 40.0)]);
    assert_eq!(moments.report.requested, 2);
    assert_eq!(moments.report.returned, 1);
    assert_eq!(moments.report.backfilled, 0);
    assert!(moments.report.is_short());
}

/// Test equal mode end to end.
#[test]
fn test_equal_mode_matches_divide_equally() {
    let source = SyntheticVideo::new(90.0)
        .with_peaks(vec![5.0])
        .with_cuts(vec![45.0]);
    let config = MomentConfig::default()
        .with_method(DetectionMethod::Equal)
        .with_num_clips(3)
        .with_clip_duration(20.0);

    let moments = MomentDetector::new(config).detect(&source).unwrap();

    // Signals present in the source are ignored in this mode.
    assert_eq!(moments.intervals, divide_equally(90.0, 20.0, 3));
    assert_eq!(moments.report.audio_candidates, 0);
    assert_eq!(moments.report.scene_candidates, 0);
    assert_eq!(moments.report.regular_candidates, 3);
}

/// Test that detection is a pure function of source and configuration.
#[test]
fn test_same_input_same_output() {
    let source = SyntheticVideo::new(300.0)
        .with_peaks(vec![40.0, 120.0, 250.0])
        .with_cuts(vec![80.0, 200.0]);
    let detector = MomentDetector::new(MomentConfig::default().with_num_clips(5));

    let first = detector.detect(&source).unwrap();
    let second = detector.detect(&source).unwrap();

    assert_eq!(first, second);
}

/// Test the selection contract over randomized sources and configurations:
/// never over quota, never out of bounds, never closer than the minimum gap,
/// always chronological.
#[test]
fn test_detection_never_violates_selection_contract() {
    let mut rng = StdRng::seed_from_u64(0x4d4f4d41);

    for _ in 0..40 {
        let duration = rng.random_range(60.0..300.0);
        let num_clips = rng.random_range(1..=8u32);
        let clip_duration = rng.random_range(5.0..30.0);
        let min_gap = rng.random_range(0.0..10.0);

        let peak_count = rng.random_range(0..5usize);
        let peaks: Vec<f64> = (0..peak_count)
            .map(|_| rng.random_range(1.0..duration - 1.0))
            .collect();
        let cut_count = rng.random_range(0..5usize);
        let cuts: Vec<f64> = (0..cut_count)
            .map(|_| rng.random_range(1.0..duration - 1.0))
            .collect();

        let source = SyntheticVideo::new(duration).with_peaks(peaks).with_cuts(cuts);
        let config = MomentConfig::default()
            .with_num_clips(num_clips)
            .with_clip_duration(clip_duration)
            .with_min_gap(min_gap);

        let moments = MomentDetector::new(config).detect(&source).unwrap();

        assert_selection_contract(&moments.intervals, duration, num_clips, min_gap);
        assert_eq!(moments.report.returned as usize, moments.intervals.len());
        assert_eq!(moments.report.requested, num_clips);
    }
}

/// Test the serialized report shape consumed by downstream tooling.
#[test]
fn test_report_serializes_with_snake_case_fields() {
    let source = SyntheticVideo::new(100.0).with_peaks(vec![50.0]);
    let moments = MomentDetector::default().detect(&source).unwrap();

    let json = moments.to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["report"]["method_used"], "smart");
    assert!(value["intervals"][0]["start"].is_number());
    assert!(value["intervals"][0]["end"].is_number());
    assert_eq!(value["report"]["requested"], 5);
}
