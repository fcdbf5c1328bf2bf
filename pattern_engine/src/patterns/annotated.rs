//! Per-bar view of a detection pass.

use serde::{Deserialize, Serialize};

use crate::detectors::support_resistance::SupportResistanceBand;
use crate::detectors::trendline::TrendlineFit;
use crate::detectors::Detection;
use crate::models::{bar::Bar, bar_series::BarSeries};
use crate::patterns::label::{PatternFamily, PatternLabel};

/// A bar with the labels and derived values attached to it.
///
/// `band` and `trendline` are `None` wherever the underlying window is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: Bar,
    /// At most one label per [`PatternFamily`], in vocabulary order.
    pub labels: Vec<PatternLabel>,
    pub band: Option<SupportResistanceBand>,
    pub trendline: Option<TrendlineFit>,
}

impl AnnotatedBar {
    pub fn label(&self, family: PatternFamily) -> Option<PatternLabel> {
        self.labels.iter().copied().find(|l| l.family() == family)
    }

    pub fn has(&self, label: PatternLabel) -> bool {
        self.labels.contains(&label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSeries {
    pub symbol: String,
    pub bars: Vec<AnnotatedBar>,
}

impl AnnotatedSeries {
    /// The series with no labels and no derived values.
    pub fn bare(series: &BarSeries) -> Self {
        Self {
            symbol: series.symbol.clone(),
            bars: series
                .bars
                .iter()
                .cloned()
                .map(|bar| AnnotatedBar {
                    bar,
                    labels: Vec::new(),
                    band: None,
                    trendline: None,
                })
                .collect(),
        }
    }

    /// Attach detections, bands and trendline fits to `series`.
    ///
    /// `bands` and `fits` are indexed like `series.bars`; shorter vectors leave
    /// the remaining bars without values.
    pub fn build(
        series: &BarSeries,
        detections: &[Detection],
        bands: &[Option<SupportResistanceBand>],
        fits: &[Option<TrendlineFit>],
    ) -> Self {
        let mut annotated = Self::bare(series);
        for (i, slot) in annotated.bars.iter_mut().enumerate() {
            slot.band = bands.get(i).copied().flatten();
            slot.trendline = fits.get(i).copied().flatten();
        }
        for detection in detections {
            let Some(slot) = annotated.bars.get_mut(detection.index) else {
                continue;
            };
            if slot.label(detection.label.family()).is_none() {
                slot.labels.push(detection.label);
            }
        }
        for slot in &mut annotated.bars {
            slot.labels.sort();
        }
        annotated
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
