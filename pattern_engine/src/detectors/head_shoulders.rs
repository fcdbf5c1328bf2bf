//! Head-and-shoulders and its inverse.
//!
//! Fires on a bar whose High dips below both neighbours while the rolling High
//! maximum stands above them (the head sits earlier in the window). The inverse
//! mirrors this on Lows and the rolling minimum.

use crate::detectors::{Detection, DetectorInput, PatternDetector, at, classify_family, neighbors};
use crate::patterns::label::{PatternFamily, PatternLabel};

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadAndShouldersDetector;

impl PatternDetector for HeadAndShouldersDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::HeadAndShoulders
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
            max > before && max > after && highs[i] < before && highs[i] < after
        };
        let is_inverse = |i: usize| {
            let (Some(min), Some((before, after))) =
                (at(&stats.low_roll_min, i), neighbors(lows, i))
            else {
                return false;
            };
            min < before && min < after && lows[i] > before && lows[i] > after
        };

        classify_family(
            input.len(),
            PatternLabel::HeadAndShoulder,
            is_top,
            PatternLabel::InverseHeadAndShoulder,
            is_inverse,
        )
    }
}
