//! Non-overlapping interval scheduling.
//!
//! Greedy by score: walk the ranked pool and accept every window compatible
//! with the selection so far, stopping at the quota. A single equal-division
//! backfill pass tops up a short selection. Whatever still conflicts after
//! that is dropped; the run returns fewer intervals rather than violating
//! the gap rule.
//!
//! Greedy selection with one backfill pass is a heuristic, not optimal
//! interval packing. It can return fewer windows than a weighted-interval
//! solver would find, and callers inspect the shortfall through the run
//! report instead of an error.

use tracing::debug;

use momenta_models::TimeRange;

use crate::candidates::Candidate;
use crate::equal_divide::divide_equally;

/// The scheduler's selection plus how much of it came from backfill.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    /// Selected intervals in chronological order.
    pub intervals: Vec<TimeRange>,
    /// How many of the intervals the backfill pass contributed.
    pub backfilled: u32,
}

/// Selects a conflict-free, gap-respecting subset of the ranked candidates.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    /// Maximum number of intervals to select.
    pub num_clips: u32,
    /// Window length used by the backfill pass, in seconds.
    pub clip_duration: f64,
    /// Minimum separation between two selected intervals, in seconds.
    pub min_gap: f64,
}

impl IntervalScheduler {
    /// Select at most `num_clips` intervals from `candidates`.
    ///
    /// Candidates are visited in descending score order; the sort is stable,
    /// so equal scores keep the pool's generation order. A candidate that
    /// conflicts with anything already accepted is skipped, never
    /// substituted.
    pub fn schedule(&self, candidates: &[Candidate], duration: f64) -> ScheduleOutcome {
        let quota = self.num_clips as usize;

        let mut ranked: Vec<&Candidate> = candidates.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut accepted: Vec<TimeRange> = Vec::with_capacity(quota);
        for candidate in ranked {
            if accepted.len() >= quota {
                break;
            }
            if self.fits(&accepted, candidate.range) {
                accepted.push(candidate.range);
            }
        }

        let mut backfilled = 0u32;
        let shortfall = (quota - accepted.len()) as u32;
        if shortfall > 0 {
            for window in divide_equally(duration, self.clip_duration, shortfall) {
                if accepted.len() >= quota {
                    break;
                }
                if self.fits(&accepted, window) {
                    accepted.push(window);
                    backfilled += 1;
                }
            }
            debug!(
                shortfall,
                backfilled, "Backfilled short selection with equal division"
            );
        }

        accepted.sort_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ScheduleOutcome {
            intervals: accepted,
            backfilled,
        }
    }

    fn fits(&self, accepted: &[TimeRange], candidate: TimeRange) -> bool {
        accepted
            .iter()
            .all(|used| compatible(candidate, *used, self.min_gap))
    }
}

/// Two windows are compatible when the earlier one ends at least `min_gap`
/// seconds before the later one starts. With `min_gap = 0` touching windows
/// are allowed; overlap never is.
pub(crate) fn compatible(a: TimeRange, b: TimeRange, min_gap: f64) -> bool {
    a.end + min_gap <= b.start || b.end + min_gap <= a.start
}
