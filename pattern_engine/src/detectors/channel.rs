//! Up / down channel: a wedge whose rolling range is tight relative to its midpoint.

use crate::detectors::triangle::{envelope_covers_previous, envelope_within_previous};
use crate::detectors::wedge::trends_agree;
use crate::detectors::{Detection, DetectorInput, PatternDetector, at, classify_family};
use crate::patterns::label::{PatternFamily, PatternLabel};
use crate::stats::trend::TrendDirection;

/// Default maximum `(max - min) / midpoint` ratio.
pub const DEFAULT_CHANNEL_RANGE: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct ChannelDetector {
    pub channel_range: f64,
}

impl Default for ChannelDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_RANGE)
    }
}

impl ChannelDetector {
    pub fn new(channel_range: f64) -> Self {
        Self { channel_range }
    }

    fn is_tight(&self, input: &DetectorInput<'_>, i: usize) -> bool {
        let (Some(max), Some(min)) = (
            at(&input.stats.high_roll_max, i),
            at(&input.stats.low_roll_min, i),
        ) else {
            return false;
        };
        max - min <= self.channel_range * (max + min) / 2.0
    }
}

impl PatternDetector for ChannelDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::Channel
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        classify_family(
            input.len(),
            PatternLabel::ChannelUp,
            |i| {
                envelope_covers_previous(input, i)
                    && self.is_tight(input, i)
                    && trends_agree(input, i, TrendDirection::Up)
            },
            PatternLabel::ChannelDown,
            |i| {
                envelope_within_previous(input, i)
                    && self.is_tight(input, i)
                    && trends_agree(input, i, TrendDirection::Down)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{bars_hlc, indices};
    use crate::stats::rolling::RollingWindowStats;

    fn run(detector: ChannelDetector, highs: &[f64], lows: &[f64]) -> Vec<Detection> {
        let bars = bars_hlc(highs, lows, lows);
        let stats = RollingWindowStats::compute(&bars, 3);
        detector.detect(&DetectorInput::new(&bars, &stats, 2))
    }

    #[test]
    fn tight_rising_band_is_channel_up() {
        let out = run(
            ChannelDetector::default(),
            &[100.0, 101.0, 102.0, 103.0],
            &[99.0, 100.0, 101.0, 102.0],
        );
        assert_eq!(indices(&out, PatternLabel::ChannelUp), vec![2, 3]);
    }

    #[test]
    fn wide_band_is_not_a_channel() {
        let out = run(ChannelDetector::default(), &[10.0, 20.0, 30.0], &[1.0, 2.0, 3.0]);
        assert!(out.is_empty());
    }

    #[test]
    fn tight_falling_band_is_channel_down() {
        let out = run(ChannelDetector::default(), &[100.0, 101.0, 99.0], &[98.0, 97.0, 97.5]);
        assert_eq!(out, vec![Detection::new(2, PatternLabel::ChannelDown)]);
    }

    #[test]
    fn range_threshold_is_configurable() {
        let highs = [100.0, 101.0, 102.0, 103.0];
        let lows = [99.0, 100.0, 101.0, 102.0];
        // range 3 on a ~100 midpoint needs a ratio of at least 0.03
        assert!(run(ChannelDetector::new(0.01), &highs, &lows).is_empty());
        assert!(!run(ChannelDetector::new(0.05), &highs, &lows).is_empty());
    }
}
