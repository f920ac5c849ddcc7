//! Visual scene-change detection.
//!
//! Samples one frame every 0.5 s and compares consecutive samples as flat
//! numeric grids. A jump in mean absolute pixel difference above the
//! threshold marks a scene boundary; a minimum spacing between recorded
//! events suppresses bursts during rapid cutting.
//!
//! The scan is a single forward pass; the "time of the last event" is fold
//! state local to one call, never shared.

use tracing::{debug, warn};

use crate::source::{FrameBuffer, SignalSource, VideoSignal};

/// Seconds between sampled frames (2 fps).
pub(crate) const FRAME_SAMPLE_INTERVAL: f64 = 0.5;

/// A detected visual discontinuity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneEvent {
    /// Event time in seconds.
    pub time: f64,
}

/// Emits scene-boundary timestamps from pixel-difference thresholding.
#[derive(Debug, Clone)]
pub struct SceneChangeDetector {
    /// Mean per-pixel difference that counts as a scene change.
    pub threshold: f64,
    /// Minimum seconds between two recorded events. Because the debounce
    /// clock starts at zero, no event lands earlier than this into the video.
    pub min_scene_duration: f64,
}

impl SceneChangeDetector {
    /// Scan the video and return a strictly increasing event sequence.
    ///
    /// Soft-fails to an empty sequence when a frame cannot be extracted or
    /// the source changes frame geometry mid-scan; scene evidence is a
    /// bonus signal, never worth aborting a run over.
    pub fn detect(&self, source: &dyn SignalSource, signal: &VideoSignal) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        let mut prev: Option<FrameBuffer> = None;
        let mut last_event_time = 0.0;

        for step in 0.. {
            let time = step as f64 * FRAME_SAMPLE_INTERVAL;
            if time >= signal.duration {
                break;
            }

            let frame = match source.frame_at(time) {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(time, error = %err, "Frame extraction failed, dropping scene events");
                    return Vec::new();
                }
            };

            if let Some(prev_frame) = &prev {
                let Some(diff) = frame_difference(&prev_frame.pixels, &frame.pixels) else {
                    warn!(time, "Frame geometry changed mid-scan, dropping scene events");
                    return Vec::new();
                };

                if diff > self.threshold && time - last_event_time >= self.min_scene_duration {
                    events.push(SceneEvent { time });
                    last_event_time = time;
                }
            }

            prev = Some(frame);
        }

        debug!(
            events = events.len(),
            threshold = self.threshold,
            "Scene scan complete"
        );
        events
    }
}

/// Mean absolute difference between two equal-sized pixel grids.
///
/// Returns `None` when the buffers disagree in size or are empty.
fn frame_difference(a: &[u8], b: &[u8]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let total: u64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum();
    Some(total as f64 / a.len() as f64)
}
