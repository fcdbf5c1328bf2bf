//! Local least-squares trendline over the closes preceding each bar.
//!
//! For bar `i >= W` the line `close = m·x + c` is fitted to `closes[i-W..i]` with
//! `x = 0..W`. A positive slope tags the bar as a support trendline, a negative
//! one as resistance; an exactly flat slope tags neither.

use serde::{Deserialize, Serialize};

use crate::detectors::{Detection, DetectorInput, PatternDetector};
use crate::patterns::label::{PatternFamily, PatternLabel};

/// Default number of closes per fit.
pub const DEFAULT_TRENDLINE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendlineKind {
    Support,
    Resistance,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendlineFit {
    pub slope: f64,
    pub intercept: f64,
    /// The fitted line projected onto the bar itself (`x = W`).
    pub fitted: f64,
}

impl TrendlineFit {
    pub fn kind(&self) -> Option<TrendlineKind> {
        if self.slope > 0.0 {
            Some(TrendlineKind::Support)
        } else if self.slope < 0.0 {
            Some(TrendlineKind::Resistance)
        } else {
            None
        }
    }

    pub fn label(&self) -> Option<PatternLabel> {
        self.kind().map(|kind| match kind {
            TrendlineKind::Support => PatternLabel::SupportTrendline,
            TrendlineKind::Resistance => PatternLabel::ResistanceTrendline,
        })
    }
}

/// Ordinary least squares over `(0, ys[0]), (1, ys[1]), ...`.
///
/// Returns `(slope, intercept)`, or `None` for fewer than two points.
pub fn least_squares(ys: &[f64]) -> Option<(f64, f64)> {
    let n = ys.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n as f64;

    let (sxy, sxx) = ys
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (x, &y)| {
            let dx = x as f64 - x_mean;
            (sxy + dx * (y - y_mean), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    Some((slope, y_mean - slope * x_mean))
}

/// Fit every bar from index `window` onward; earlier bars get `None`.
pub fn fit_trendlines(closes: &[f64], window: usize) -> Vec<Option<TrendlineFit>> {
    (0..closes.len())
        .map(|i| {
            if window < 2 || i < window {
                return None;
            }
            let (slope, intercept) = least_squares(&closes[i - window..i])?;
            Some(TrendlineFit {
                slope,
                intercept,
                fitted: slope * window as f64 + intercept,
            })
        })
        .collect()
}

/// Labels the bars whose precomputed fit in [`DetectorInput::trendlines`] has a non-zero slope.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendlineDetector;

impl PatternDetector for TrendlineDetector {
    fn family(&self) -> PatternFamily {
        PatternFamily::Trendline
    }

    fn detect(&self, input: &DetectorInput<'_>) -> Vec<Detection> {
        input
            .trendlines
            .iter()
            .enumerate()
            .filter_map(|(i, fit)| Some(Detection::new(i, fit.as_ref()?.label()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{bars_hlc, indices};
    use crate::stats::rolling::RollingWindowStats;

    fn run(closes: &[f64], window: usize) -> Vec<Detection> {
        let bars = bars_hlc(closes, closes, closes);
        let stats = RollingWindowStats::compute(&bars, 3);
        TrendlineDetector.detect(&DetectorInput::new(&bars, &stats, window))
    }

    #[test]
    fn exact_line_is_recovered() {
        let (slope, intercept) = least_squares(&[3.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(slope, 2.0);
        assert_eq!(intercept, 3.0);
        assert!(least_squares(&[1.0]).is_none());
    }

    #[test]
    fn fits_use_only_preceding_closes() {
        let fits = fit_trendlines(&[1.0, 2.0, 100.0], 2);
        assert_eq!(fits[..2], [None, None]);
        let fit = fits[2].unwrap();
        assert_eq!(fit.slope, 1.0);
        assert_eq!(fit.intercept, 1.0);
        assert_eq!(fit.fitted, 3.0);
    }

    #[test]
    fn rising_and_falling_closes() {
        let out = run(&[1.0, 2.0, 3.0, 2.0, 1.0], 2);
        assert_eq!(indices(&out, PatternLabel::SupportTrendline), vec![2, 3]);
        assert_eq!(indices(&out, PatternLabel::ResistanceTrendline), vec![4]);
    }

    #[test]
    fn flat_closes_are_neither_support_nor_resistance() {
        let fits = fit_trendlines(&[10.0, 10.0, 10.0], 2);
        let fit = fits[2].unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.kind(), None);
        assert!(run(&[10.0, 10.0, 10.0], 2).is_empty());
    }

    #[test]
    fn detections_follow_the_shared_fits() {
        let bars = bars_hlc(&[1.0, 3.0, 2.0, 2.0], &[1.0; 4], &[1.0, 3.0, 2.0, 2.0]);
        let stats = RollingWindowStats::compute(&bars, 3);
        let input = DetectorInput::new(&bars, &stats, 2);

        let from_fits: Vec<Detection> = input
            .trendlines
            .iter()
            .enumerate()
            .filter_map(|(i, fit)| Some(Detection::new(i, fit.as_ref()?.label()?)))
            .collect();
        assert_eq!(TrendlineDetector.detect(&input), from_fits);
        assert_eq!(
            from_fits,
            vec![
                Detection::new(2, PatternLabel::SupportTrendline),
                Detection::new(3, PatternLabel::ResistanceTrendline),
            ]
        );
    }

    #[test]
    fn window_below_two_never_fits() {
        assert!(fit_trendlines(&[1.0, 2.0, 3.0], 1).iter().all(Option::is_none));
    }
}
