//! Rising / falling wedge: triangle envelope with High and Low trends agreeing.

use crate::detectors::triangle::{envelope_covers_previous, envelope_within_previous};
use crate::detectors::{Detection, DetectorInput, PatternDetector, classify_family};
use crate::patterns::label::{PatternFamily, PatternLabel};
use crate::stats::trend::TrendDirection;

/// Both rolling trends at `i` equal `direction`.
pub(crate) fn trends_agree(input: &DetectorInput<'_>, i: usize, direction: TrendDirection) -> bool {
    let stats = input.stats;
    stats.trend_high.get(i).copied().flatten() == Some(direction)
        && stats.trend_low.get(i).copied().flatten() == Some(direction)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WedgeDetector;

impl PatternDetector for WedgeDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::Wedge
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        classify_family(
            input.len(),
            PatternLabel::WedgeUp,
            |i| envelope_covers_previous(input, i) && trends_agree(input, i, TrendDirection::Up),
            PatternLabel::WedgeDown,
            |i| envelope_within_previous(input, i) && trends_agree(input, i, TrendDirection::Down),
        )
    }
}
