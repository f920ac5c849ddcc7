//! Evenly spaced interval layout.
//!
//! Used directly by the `equal` method, as the deterministic fallback when
//! audio analysis yields nothing, and by the scheduler to backfill a short
//! selection.

use momenta_models::TimeRange;

/// Divide `duration` into `num_clips` evenly spaced intervals.
///
/// Interval `i` starts at `i * duration / num_clips` and runs for
/// `clip_duration` seconds, clamped to the end of the video. Starts are
/// always in ascending order; intervals may overlap when `clip_duration`
/// exceeds the spacing.
pub fn divide_equally(duration: f64, clip_duration: f64, num_clips: u32) -> Vec<TimeRange> {
    if num_clips == 0 {
        return Vec::new();
    }

    let interval = duration / f64::from(num_clips);
    (0..num_clips)
        .map(|i| {
            let start = f64::from(i) * interval;
            let end = (start + clip_duration).min(duration);
            TimeRange::new(start, end)
        })
        .collect()
}

/// Lay out `num_clips` windows centered on evenly spaced points.
///
/// The centers sit at `i * duration / (num_clips + 1)` for `i` in
/// `1..=num_clips`, so the first and last windows stay clear of the video
/// edges. Each window is clamped into `[0, duration]`.
pub fn centered_windows(duration: f64, clip_duration: f64, num_clips: u32) -> Vec<TimeRange> {
    if num_clips == 0 {
        return Vec::new();
    }

    let interval = duration / f64::from(num_clips + 1);
    (1..=num_clips)
        .map(|i| {
            let center = f64::from(i) * interval;
            let start = (center - clip_duration / 2.0).max(0.0);
            let end = (start + clip_duration).min(duration);
            TimeRange::new(start, end)
        })
        .collect()
}
