//! Demo: Automatic Moment Detection
//!
//! Runs every detection method over a synthetic ten-minute "episode" with
//! applause bursts and camera cuts, and prints the selected intervals.
//!
//! Run with: cargo run -p momenta-detect --example auto_detect_demo

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use momenta_detect::{
    AudioBuffer, FrameBuffer, MomentConfig, MomentDetector, SignalSource, SourceError, VideoSignal,
};
use momenta_models::{format_seconds, DetectionMethod};

/// Ten minutes of quiet talk with applause at fixed times and hard camera
/// cuts between segments.
struct EpisodeSource {
    signal: VideoSignal,
    applause_times: Vec<f64>,
    cut_times: Vec<f64>,
}

impl EpisodeSource {
    fn new() -> Self {
        Self {
            signal: VideoSignal {
                duration: 600.0,
                sample_rate: 8_000,
                fps: 30.0,
                width: 16,
                height: 9,
            },
            applause_times: vec![45.0, 132.0, 287.0, 454.0, 561.0],
            cut_times: vec![90.0, 210.0, 390.0, 510.0],
        }
    }
}

impl SignalSource for EpisodeSource {
    fn probe(&self) -> Result<VideoSignal, SourceError> {
        Ok(self.signal)
    }

    fn audio_samples(&self, sample_rate: u32) -> Result<AudioBuffer, SourceError> {
        let total = (self.signal.duration * f64::from(sample_rate)) as usize;
        let samples = (0..total)
            .map(|i| {
                let t = i as f64 / f64::from(sample_rate);
                let applause = self
                    .applause_times
                    .iter()
                    .any(|&at| t >= at && t < at + 0.5);
                let amplitude = if applause { 0.9 } else { 0.05 };
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

fn main() {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("momenta=debug".parse().expect("valid directive"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();

    let source = EpisodeSource::new();

    for method in DetectionMethod::ALL {
        println!("\n{}", "=".repeat(60));
        println!("METHOD: {}", method);
        println!("{}", "=".repeat(60));

        let config = MomentConfig::default()
            .with_method(method)
            .with_num_clips(4)
            .with_clip_duration(30.0)
            .with_min_gap(10.0);

        let moments = MomentDetector::new(config)
            .detect(&source)
            .expect("synthetic source should always probe");

        for (i, range) in moments.intervals.iter().enumerate() {
            println!(
                "  clip {}: {} - {}  ({:.0}s)",
                i + 1,
                format_seconds(range.start),
                format_seconds(range.end),
                range.duration()
            );
        }

        println!(
            "\n{}",
            moments
                .to_json_pretty()
                .expect("serialization should be infallible")
        );
    }
}
