//! Multiple top / multiple bottom.
//!
//! Compares the rolling High/Low envelope against the previous bar and the
//! rolling Close extreme against the previous close.

use crate::detectors::{Detection, DetectorInput, PatternDetector, at, classify_family, prev};
use crate::patterns::label::{PatternFamily, PatternLabel};

#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleTopBottomDetector;

impl PatternDetector for MultipleTopBottomDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::MultipleTopBottom
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        let stats = input.stats;

        let is_top = |i: usize| {
            let (Some(high_max), Some(close_max), Some(prev_high), Some(prev_close)) = (
                at(&stats.high_roll_max, i),
                at(&stats.close_roll_max, i),
                prev(&input.highs, i),
                prev(&input.closes, i),
            ) else {
                return false;
            };
            high_max >= prev_high && close_max < prev_close
        };
        let is_bottom = |i: usize| {
            let (Some(low_min), Some(close_min), Some(prev_low), Some(prev_close)) = (
                at(&stats.low_roll_min, i),
                at(&stats.close_roll_min, i),
                prev(&input.lows, i),
                prev(&input.closes, i),
            ) else {
                return false;
            };
            low_min <= prev_low && close_min > prev_close
        };

        classify_family(
            input.len(),
            PatternLabel::MultipleTop,
            is_top,
            PatternLabel::MultipleBottom,
            is_bottom,
        )
    }
}
