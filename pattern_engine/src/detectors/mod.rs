//! Pattern detectors.
//!
//! Each detector is a pure function of the bars and their rolling statistics and
//! emits `(index, label)` pairs. Detectors never read each other's output, so the
//! engine is free to run them in any order or in parallel.
//!
//! Within one family the up-variant is checked first and a bar receives at most
//! one label from that family.

pub mod channel;
pub mod double_top_bottom;
pub mod head_shoulders;
pub mod multiple_top_bottom;
pub mod pivots;
pub mod support_resistance;
pub mod trendline;
pub mod triangle;
pub mod wedge;

use serde::{Deserialize, Serialize};

use crate::config::DetectOptions;
use crate::detectors::trendline::{TrendlineFit, fit_trendlines};
use crate::models::bar::Bar;
use crate::patterns::label::{PatternFamily, PatternLabel};
use crate::stats::rolling::RollingWindowStats;

/// One label fired at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Detection {
    pub index: usize,
    pub label: PatternLabel,
}

impl Detection {
    pub fn new(index: usize, label: PatternLabel) -> Self {
        Self { index, label }
    }
}

/// Read-only view shared by every detector in a pass.
///
/// Trendline fits are computed here once; the trendline detector labels from
/// them and the engine attaches the same fits to the annotated series.
#[derive(Debug)]
pub struct DetectorInput<'a> {
    pub bars: &'a [Bar],
    pub stats: &'a RollingWindowStats,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub closes: Vec<f64>,
    pub trendlines: Vec<Option<TrendlineFit>>,
}

impl<'a> DetectorInput<'a> {
    pub fn new(bars: &'a [Bar], stats: &'a RollingWindowStats, trendline_window: usize) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        Self {
            bars,
            stats,
            highs: bars.iter().map(|b| b.high).collect(),
            lows: bars.iter().map(|b| b.low).collect(),
            trendlines: fit_trendlines(&closes, trendline_window),
            closes,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// A detector for one pattern family.
pub trait PatternDetector: Send + Sync {
    fn family(&self) -> PatternFamily;

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection>;
}

/// The full detector set in vocabulary order.
pub fn default_detectors(options: &DetectOptions) -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(head_shoulders::HeadAndShouldersDetector),
        Box::new(multiple_top_bottom::MultipleTopBottomDetector),
        Box::new(triangle::TriangleDetector),
        Box::new(wedge::WedgeDetector),
        Box::new(channel::ChannelDetector::new(options.channel_range)),
        Box::new(double_top_bottom::DoubleTopBottomDetector::new(
            options.double_top_bottom_threshold,
        )),
        Box::new(trendline::TrendlineDetector),
        Box::new(pivots::PivotDetector),
    ]
}

/// Value at `index`, `None` when out of range or not available.
#[inline]
pub(crate) fn at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

/// `values[index - 1]`, `None` at the first bar.
#[inline]
pub(crate) fn prev(values: &[f64], index: usize) -> Option<f64> {
    index.checked_sub(1).and_then(|i| values.get(i).copied())
}

/// `(values[index - 1], values[index + 1])`, `None` at either boundary.
#[inline]
pub(crate) fn neighbors(values: &[f64], index: usize) -> Option<(f64, f64)> {
    let before = prev(values, index)?;
    let after = values.get(index.checked_add(1)?).copied()?;
    Some((before, after))
}

/// Scan every bar, emitting `up` when its predicate holds, else `down` when that one does.
pub(crate) fn classify_family<U, D>(
    len: usize,
    up: PatternLabel,
    is_up: U,
    down: PatternLabel,
    is_down: D,
) -> Vec<Detection>
where
    U: Fn(usize) -> bool,
    D: Fn(usize) -> bool,
{
    (0..len)
        .filter_map(|i| {
            if is_up(i) {
                Some(Detection::new(i, up))
            } else if is_down(i) {
                Some(Detection::new(i, down))
            } else {
                None
            }
        })
        .collect()
}
