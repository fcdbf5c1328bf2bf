//! Pivot turning points from first differences of Highs and Lows.
//!
//! With `dh[i] = high[i] - high[i-1]` and `dl[i] = low[i] - low[i-1]`, bar `i` is
//! flagged when the sign of its difference flips at `i + 1`:
//!
//! | label | rule |
//! |---|---|
//! | Higher High | `dh[i] > 0 && dh[i+1] < 0` |
//! | Lower Low | `dl[i] < 0 && dl[i+1] > 0` |
//! | Lower High | `dh[i] < 0 && dh[i+1] > 0` |
//! | Higher Low | `dl[i] > 0 && dl[i+1] < 0` |
//!
//! Rules are tried in that order and the first match is the bar's only pivot label.
//! The first bar has no difference and the last has no next one, so neither fires.

use crate::detectors::{Detection, DetectorInput, PatternDetector};
use crate::patterns::label::{PatternFamily, PatternLabel};

/// `values[i] - values[i-1]`, `None` at index 0.
pub fn first_differences(values: &[f64]) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| i.checked_sub(1).map(|p| values[i] - values[p]))
        .collect()
}

/// `(d[i], d[i+1])` when both are defined.
fn step_pair(d: &[Option<f64>], i: usize) -> Option<(f64, f64)> {
    Some((d.get(i).copied().flatten()?, d.get(i + 1).copied().flatten()?))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PivotDetector;

impl PatternDetector for PivotDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::Pivot
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        let dh = first_differences(&input.highs);
        let dl = first_differences(&input.lows);
        (0..input.len())
            .filter_map(|i| {
                let high = step_pair(&dh, i);
                let low = step_pair(&dl, i);
                let label = if high.is_some_and(|(d, next)| d > 0.0 && next < 0.0) {
                    PatternLabel::HigherHigh
                } else if low.is_some_and(|(d, next)| d < 0.0 && next > 0.0) {
                    PatternLabel::LowerLow
                } else if high.is_some_and(|(d, next)| d < 0.0 && next > 0.0) {
                    PatternLabel::LowerHigh
                } else if low.is_some_and(|(d, next)| d > 0.0 && next < 0.0) {
                    PatternLabel::HigherLow
                } else {
                    return None;
                };
                Some(Detection::new(i, label))
            })
            .collect()
    }
}
