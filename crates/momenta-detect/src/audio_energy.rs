//! Audio loudness analysis.
//!
//! This module handles:
//! 1. Folding raw samples into a windowed RMS loudness curve
//! 2. Normalizing the curve by the run's loudest window
//! 3. Finding prominent peaks and centering clip windows on them
//! 4. Falling back to equal division when the signal gives nothing
//!
//! The curve uses one value per 0.5 s window, matching the frame sampling
//! cadence on the visual side.

use serde::Serialize;
use tracing::{debug, warn};

use momenta_models::TimeRange;

use crate::equal_divide::divide_equally;
use crate::peaks::find_peaks;
use crate::source::{SignalSource, VideoSignal};

/// Length of one RMS window in seconds.
pub(crate) const ENERGY_WINDOW_SECS: f64 = 0.5;

/// One windowed loudness sample on the normalized curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyPoint {
    /// Window start time in seconds.
    pub time: f64,
    /// RMS amplitude normalized to the run's maximum (0-1).
    pub value: f32,
}

/// Fold samples into the normalized per-window RMS curve.
///
/// Only complete windows contribute; a trailing partial window is dropped.
/// Accumulation happens in f64 so long windows do not lose precision.
/// All-zero input stays all-zero rather than dividing by the maximum.
pub fn energy_curve(samples: &[f32], sample_rate: u32) -> Vec<EnergyPoint> {
    let window_size = (f64::from(sample_rate) * ENERGY_WINDOW_SECS) as usize;
    if window_size == 0 {
        return Vec::new();
    }

    let mut points: Vec<EnergyPoint> = samples
        .chunks_exact(window_size)
        .enumerate()
        .map(|(i, window)| {
            let sum_squares: f64 = window.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
            EnergyPoint {
                time: i as f64 * ENERGY_WINDOW_SECS,
                value: (sum_squares / window.len() as f64).sqrt() as f32,
            }
        })
        .collect();

    let max = points.iter().map(|p| p.value).fold(0.0f32, f32::max);
    if max > 0.0 {
        for point in &mut points {
            point.value /= max;
        }
    }

    points
}

/// Finds loudness peaks and proposes clip windows centered on them.
///
/// Never fails: when the source has no audio track, sample extraction
/// errors, or no peak clears the prominence bar, the analyzer degrades to
/// [`divide_equally`] over the full duration.
#[derive(Debug, Clone)]
pub struct AudioEnergyAnalyzer {
    /// Shortest acceptable window in seconds.
    pub min_clip_duration: f64,
    /// Longest (and preferred) window in seconds.
    pub max_clip_duration: f64,
    /// Maximum number of windows to propose.
    pub num_candidates: u32,
    /// Minimum peak prominence on the normalized curve (0-1).
    pub prominence: f64,
}

impl AudioEnergyAnalyzer {
    /// Propose up to `num_candidates` windows, sorted by start time.
    pub fn analyze(&self, source: &dyn SignalSource, signal: &VideoSignal) -> Vec<TimeRange> {
        let buffer = match source.audio_samples(signal.sample_rate) {
            Ok(buffer) => buffer,
            Err(err) => {
                warn!(error = %err, "Audio unavailable, falling back to equal division");
                return self.fallback(signal.duration);
            }
        };

        let samples = buffer.first_channel();
        let curve = energy_curve(&samples, signal.sample_rate);
        let values: Vec<f32> = curve.iter().map(|p| p.value).collect();

        let min_distance = (self.min_clip_duration / ENERGY_WINDOW_SECS) as usize;
        let mut peaks = find_peaks(&values, self.prominence as f32, min_distance);

        if peaks.is_empty() {
            warn!(
                windows = curve.len(),
                prominence = self.prominence,
                "No audio peaks found, falling back to equal division"
            );
            return self.fallback(signal.duration);
        }

        peaks.sort_by(|a, b| {
            b.prominence
                .partial_cmp(&a.prominence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        peaks.truncate(self.num_candidates as usize);

        let mut windows: Vec<TimeRange> = peaks
            .iter()
            .map(|peak| self.window_around(curve[peak.index].time, signal.duration))
            .collect();
        windows.sort_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            windows = curve.len(),
            peaks = windows.len(),
            "Audio peak windows selected"
        );
        windows
    }

    /// Center a `max_clip_duration` window on `peak_time`, clamped into the
    /// video. Near the tail the window shrinks, but never below
    /// `min_clip_duration` while room remains at the front.
    fn window_around(&self, peak_time: f64, duration: f64) -> TimeRange {
        let mut start = (peak_time - self.max_clip_duration / 2.0).max(0.0);
        let end = (start + self.max_clip_duration).min(duration);
        if end - start < self.min_clip_duration {
            start = (end - self.min_clip_duration).max(0.0);
        }
        TimeRange::new(start, end)
    }

    fn fallback(&self, duration: f64) -> Vec<TimeRange> {
        divide_equally(duration, self.max_clip_duration, self.num_candidates)
    }
}

/// Debug helper: dump the normalized energy curve to a JSON file.
///
/// Useful for tuning prominence thresholds against real footage.
#[cfg(feature = "debug-signals")]
pub fn dump_energy_curve(
    source: &dyn SignalSource,
    signal: &VideoSignal,
    output_path: &std::path::Path,
) -> crate::error::DetectResult<()> {
    let buffer = source.audio_samples(signal.sample_rate)?;
    let curve = energy_curve(&buffer.first_channel(), signal.sample_rate);

    let json = serde_json::to_string_pretty(&curve)?;
    std::fs::write(output_path, json)?;

    tracing::info!(
        points = curve.len(),
        path = %output_path.display(),
        "Energy curve debug output written"
    );

    Ok(())
}
