//! The detection pass: bars → rolling statistics → detectors → index.

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::config::{DetectOptions, validate_window};
use crate::detectors::support_resistance::support_resistance_bands;
use crate::detectors::{Detection, DetectorInput, default_detectors};
use crate::errors::Error;
use crate::models::bar_series::BarSeries;
use crate::patterns::{annotated::AnnotatedSeries, index::PatternIndex};
use crate::stats::rolling::RollingWindowStats;

/// Run every detector over `series` with rolling window `window`.
///
/// Returns the series annotated per bar together with the label → timestamps index.
/// A series shorter than `window` is not an error: it comes back bare, with an
/// empty index.
///
/// Errors:
/// - [`ValidationError`](crate::errors::ValidationError) for `window == 0`, out-of-range
///   options, non-finite prices, or timestamps that are not strictly increasing.
pub fn detect_patterns(
    series: &BarSeries,
    window: usize,
    options: &DetectOptions,
) -> Result<(AnnotatedSeries, PatternIndex), Error> {
    validate_window(window)?;
    options.validate()?;
    series.validate()?;

    if series.len() < window {
        warn!(
            symbol = %series.symbol,
            bars = series.len(),
            window,
            "series shorter than window; no patterns detected"
        );
        return Ok((AnnotatedSeries::bare(series), PatternIndex::default()));
    }

    let stats = RollingWindowStats::compute(&series.bars, window);
    let input = DetectorInput::new(&series.bars, &stats, options.trendline_window);

    let detections: Vec<Detection> = default_detectors(options)
        .par_iter()
        .map(|detector| {
            let found = detector.detect(&input);
            trace!(family = ?detector.family(), count = found.len(), "detector finished");
            found
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    let bands = support_resistance_bands(&stats, options.band_std_multiplier);
    let annotated = AnnotatedSeries::build(series, &detections, &bands, &input.trendlines);
    let index = PatternIndex::from_detections(&series.bars, &detections);

    debug!(
        symbol = %series.symbol,
        bars = series.len(),
        window,
        labels = index.len(),
        events = index.event_count(),
        "pattern detection complete"
    );

    Ok((annotated, index))
}

/// Run [`detect_patterns`] over many series in parallel.
///
/// Each series is processed in isolation; results keep the input order.
pub fn detect_patterns_batch(
    series: &[BarSeries],
    window: usize,
    options: &DetectOptions,
) -> Vec<Result<(AnnotatedSeries, PatternIndex), Error>> {
    series
        .par_iter()
        .map(|s| detect_patterns(s, window, options))
        .collect()
}
