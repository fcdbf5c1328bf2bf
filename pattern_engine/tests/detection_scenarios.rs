mod common;
use common::{day, days, series};

use pattern_engine::config::DetectOptions;
use pattern_engine::engine::detect_patterns;
use pattern_engine::errors::{Error, ValidationError};
use pattern_engine::models::bar_series::BarSeries;
use pattern_engine::patterns::label::{PatternFamily, PatternLabel};

#[test]
fn ascending_triangle_fires_once_statistics_are_available() {
    let s = series("TRI", &[10.0; 5], &[5.0; 5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
    let (annotated, patterns) = detect_patterns(&s, 3, &DetectOptions::default()).unwrap();

    assert_eq!(
        patterns.timestamps(PatternLabel::AscendingTriangle),
        days(&[2, 3, 4]).as_slice()
    );
    assert!(patterns.get(PatternLabel::DescendingTriangle).is_none());
    for bar in &annotated.bars[..2] {
        assert_eq!(bar.label(PatternFamily::Triangle), None);
    }
}

#[test]
fn double_top_fires_at_the_bar_between_the_two_highs() {
    let s = series(
        "DT",
        &[100.0, 105.0, 101.0, 105.0, 100.0],
        &[99.0, 104.0, 90.0, 104.0, 99.0],
        &[99.5, 104.5, 95.0, 104.5, 99.5],
    );
    let (_, patterns) = detect_patterns(&s, 3, &DetectOptions::default()).unwrap();
    assert_eq!(patterns.timestamps(PatternLabel::DoubleTop), &[day(2)]);
}

#[test]
fn double_top_threshold_comes_from_options() {
    let s = series(
        "DT",
        &[100.0, 105.0, 101.0, 105.0, 100.0],
        &[99.0, 104.0, 90.0, 96.0, 99.0],
        &[99.5, 104.5, 95.0, 100.0, 99.5],
    );
    let (_, strict) = detect_patterns(&s, 3, &DetectOptions::default()).unwrap();
    assert!(strict.get(PatternLabel::DoubleTop).is_none());

    let loose = DetectOptions {
        double_top_bottom_threshold: 0.10,
        ..DetectOptions::default()
    };
    let (_, patterns) = detect_patterns(&s, 3, &loose).unwrap();
    assert_eq!(patterns.timestamps(PatternLabel::DoubleTop), &[day(2)]);
}

#[test]
fn insufficient_data_is_not_an_error() {
    let s = series("SHORT", &[10.0, 11.0], &[9.0, 10.0], &[9.5, 10.5]);
    let (annotated, patterns) = detect_patterns(&s, 3, &DetectOptions::default()).unwrap();
    assert!(patterns.is_empty());
    assert_eq!(annotated.len(), 2);
    assert!(annotated.bars.iter().all(|b| b.labels.is_empty()));
}

#[test]
fn flat_closes_produce_no_trendline_label() {
    let s = series("FLAT", &[11.0, 12.0, 13.0], &[9.0, 8.0, 7.0], &[10.0, 10.0, 10.0]);
    let (annotated, patterns) = detect_patterns(&s, 2, &DetectOptions::default()).unwrap();

    let fit = annotated.bars[2].trendline.expect("fit at index 2");
    assert_eq!(fit.slope, 0.0);
    assert!(patterns.get(PatternLabel::SupportTrendline).is_none());
    assert!(patterns.get(PatternLabel::ResistanceTrendline).is_none());
}

#[test]
fn rising_closes_produce_support_trendlines() {
    let s = series("UP", &[11.0; 4], &[9.0; 4], &[1.0, 2.0, 3.0, 4.0]);
    let (_, patterns) = detect_patterns(&s, 2, &DetectOptions::default()).unwrap();
    assert_eq!(
        patterns.timestamps(PatternLabel::SupportTrendline),
        days(&[2, 3]).as_slice()
    );
}

#[test]
fn higher_high_takes_priority_over_higher_low() {
    // dh and dl both flip + to - at index 1.
    let s = series("PIV", &[1.0, 2.0, 1.0], &[0.5, 1.5, 0.5], &[1.0, 2.0, 1.0]);
    let (annotated, patterns) = detect_patterns(&s, 1, &DetectOptions::default()).unwrap();

    assert_eq!(patterns.timestamps(PatternLabel::HigherHigh), &[day(1)]);
    assert!(patterns.get(PatternLabel::HigherLow).is_none());
    assert_eq!(
        annotated.bars[1].label(PatternFamily::Pivot),
        Some(PatternLabel::HigherHigh)
    );
}

#[test]
fn lower_low_takes_priority_over_lower_high() {
    let s = series("PIV", &[2.0, 1.0, 2.0], &[1.5, 0.5, 1.5], &[2.0, 1.0, 2.0]);
    let (_, patterns) = detect_patterns(&s, 1, &DetectOptions::default()).unwrap();

    assert_eq!(patterns.timestamps(PatternLabel::LowerLow), &[day(1)]);
    assert!(patterns.get(PatternLabel::LowerHigh).is_none());
}

#[test]
fn repeated_runs_serialize_identically() {
    let s = series(
        "DET",
        &[10.0, 12.0, 11.0, 13.0, 12.5, 14.0, 13.0, 12.0],
        &[9.0, 10.0, 9.5, 11.0, 11.5, 12.0, 11.0, 10.5],
        &[9.5, 11.5, 10.0, 12.5, 12.0, 13.5, 11.5, 11.0],
    );
    let options = DetectOptions::default();
    let first = detect_patterns(&s, 3, &options).unwrap();
    let second = detect_patterns(&s, 3, &options).unwrap();

    assert_eq!(
        serde_json::to_string(&first.0).unwrap(),
        serde_json::to_string(&second.0).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.1).unwrap(),
        serde_json::to_string(&second.1).unwrap()
    );
}

#[test]
fn out_of_order_timestamps_are_rejected() {
    let mut s = series("BAD", &[2.0; 4], &[1.0; 4], &[1.5; 4]);
    s.bars.swap(1, 2);
    let err = detect_patterns(&s, 2, &DetectOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NonMonotonicTimestamp { index: 2, .. })
    ));
}

#[test]
fn empty_series_yields_empty_index() {
    let s = BarSeries::new("NONE", vec![]);
    let (annotated, patterns) = detect_patterns(&s, 3, &DetectOptions::default()).unwrap();
    assert!(annotated.is_empty());
    assert!(patterns.is_empty());
}
