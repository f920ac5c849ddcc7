//! Peak detection over sampled 1-D signals.
//!
//! Finds local maxima (plateaus resolve to their midpoint), thins them so no
//! two survivors sit closer than a minimum distance (taller peaks win), and
//! scores each survivor by prominence: its height above the higher of the two
//! valleys separating it from taller terrain.

/// A detected peak in a sampled signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Sample index of the peak (plateau midpoint for flat tops).
    pub index: usize,
    /// Height above the surrounding valleys.
    pub prominence: f32,
}

/// Find peaks at least `min_prominence` tall and `min_distance` samples apart.
///
/// Results are in ascending index order. A signal shorter than three samples
/// has no interior and yields no peaks.
pub fn find_peaks(values: &[f32], min_prominence: f32, min_distance: usize) -> Vec<Peak> {
    let maxima = local_maxima(values);
    let maxima = enforce_distance(values, &maxima, min_distance);

    maxima
        .into_iter()
        .map(|index| Peak {
            index,
            prominence: prominence_at(values, index),
        })
        .filter(|peak| peak.prominence >= min_prominence)
        .collect()
}

/// Indices of local maxima, with plateaus collapsed to their midpoint.
fn local_maxima(values: &[f32]) -> Vec<usize> {
    let n = values.len();
    if n < 3 {
        return Vec::new();
    }

    let mut maxima = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if values[i - 1] < values[i] {
            // Skip over a flat top; `ahead` lands on the first sample past it.
            let mut ahead = i + 1;
            while ahead < n - 1 && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    maxima
}

/// Drop maxima closer than `min_distance` to a taller one.
///
/// Peaks are visited tallest first; each survivor clears its neighborhood,
/// and a peak already cleared loses its turn.
fn enforce_distance(values: &[f32], maxima: &[usize], min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 || maxima.len() < 2 {
        return maxima.to_vec();
    }

    let mut keep = vec![true; maxima.len()];
    let mut order: Vec<usize> = (0..maxima.len()).collect();
    order.sort_by(|&a, &b| {
        values[maxima[a]]
            .partial_cmp(&values[maxima[b]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && maxima[j] - maxima[k - 1] < min_distance {
            k -= 1;
            keep[k] = false;
        }
        let mut k = j + 1;
        while k < maxima.len() && maxima[k] - maxima[j] < min_distance {
            keep[k] = false;
            k += 1;
        }
    }

    maxima
        .iter()
        .zip(keep)
        .filter_map(|(&index, kept)| kept.then_some(index))
        .collect()
}

/// Prominence of the peak at `peak`: height minus the higher of the lowest
/// points reached walking left and right before terrain rises above the peak.
fn prominence_at(values: &[f32], peak: usize) -> f32 {
    let height = values[peak];

    let mut left_min = height;
    let mut i = peak;
    while values[i] <= height {
        if values[i] < left_min {
            left_min = values[i];
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    let mut right_min = height;
    let mut i = peak;
    while i < values.len() && values[i] <= height {
        if values[i] < right_min {
            right_min = values[i];
        }
        i += 1;
    }

    height - left_min.max(right_min)
}
