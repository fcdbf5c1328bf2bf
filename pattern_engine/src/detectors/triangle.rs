//! Ascending / descending triangle, plus the envelope checks wedges and channels reuse.

use crate::detectors::{Detection, DetectorInput, PatternDetector, at, classify_family, prev};
use crate::patterns::label::{PatternFamily, PatternLabel};

/// Rolling High max reaches the previous High and rolling Low min reaches the previous Low.
pub(crate) fn envelope_covers_previous(input: &DetectorInput<'_>, i: usize) -> bool {
    let (Some(max), Some(min), Some(prev_high), Some(prev_low)) = (
        at(&input.stats.high_roll_max, i),
        at(&input.stats.low_roll_min, i),
        prev(&input.highs, i),
        prev(&input.lows, i),
    ) else {
        return false;
    };
    max >= prev_high && min <= prev_low
}

/// Rolling High max is at most the previous High and rolling Low min at least the previous Low.
pub(crate) fn envelope_within_previous(input: &DetectorInput<'_>, i: usize) -> bool {
    let (Some(max), Some(min), Some(prev_high), Some(prev_low)) = (
        at(&input.stats.high_roll_max, i),
        at(&input.stats.low_roll_min, i),
        prev(&input.highs, i),
        prev(&input.lows, i),
    ) else {
        return false;
    };
    max <= prev_high && min >= prev_low
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleDetector;

impl PatternDetector for TriangleDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::Triangle
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        let closes = &input.closes;
        let close_rises = |i: usize| prev(closes, i).is_some_and(|p| closes[i] > p);
        let close_falls = |i: usize| prev(closes, i).is_some_and(|p| closes[i] < p);

        classify_family(
            input.len(),
            PatternLabel::AscendingTriangle,
            |i| envelope_covers_previous(input, i) && close_rises(i),
            PatternLabel::DescendingTriangle,
            |i| envelope_within_previous(input, i) && close_falls(i),
        )
    }
}
