//! Double top / double bottom.
//!
//! Same neighbour comparison as head-and-shoulders (non-strict against the rolling
//! extreme), with a tightness filter on both neighbouring bars: each must have a
//! High-Low range within `threshold` of its own midpoint.

use crate::detectors::{Detection, DetectorInput, PatternDetector, at, classify_family, neighbors};
use crate::patterns::label::{PatternFamily, PatternLabel};

/// Default neighbour range threshold (5% of the bar midpoint).
pub const DEFAULT_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct DoubleTopBottomDetector {
    pub threshold: f64,
}

impl Default for DoubleTopBottomDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl DoubleTopBottomDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Both neighbours of `i` exist and are tight bars.
    fn neighbours_tight(&self, input: &DetectorInput<'_>, i: usize) -> bool {
        if i == 0 || i + 1 >= input.len() {
            return false;
        }
        [&input.bars[i - 1], &input.bars[i + 1]]
            .iter()
            .all(|bar| bar.range() <= self.threshold * bar.midpoint())
    }
}

impl PatternDetector for DoubleTopBottomDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::DoubleTopBottom
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        let stats = input.stats;
        let (highs, lows) = (&input.highs, &input.lows);

        let is_top = |i: usize| {
            let (Some(max), Some((before, after))) =
                (at(&stats.high_roll_max, i), neighbors(highs, i))
            else {
                return false;
            };
            max >= before
                && max >= after
                && highs[i] < before
                && highs[i] < after
                && self.neighbours_tight(input, i)
        };
        let is_bottom = |i: usize| {
            let (Some(min), Some((before, after))) =
                (at(&stats.low_roll_min, i), neighbors(lows, i))
            else {
                return false;
            };
            min <= before
                && min <= after
                && lows[i] > before
                && lows[i] > after
                && self.neighbours_tight(input, i)
        };

        classify_family(
            input.len(),
            PatternLabel::DoubleTop,
            is_top,
            PatternLabel::DoubleBottom,
            is_bottom,
        )
    }
}
