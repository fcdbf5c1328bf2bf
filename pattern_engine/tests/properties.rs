mod common;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use pattern_engine::config::DetectOptions;
use pattern_engine::engine::detect_patterns;
use pattern_engine::models::bar_series::BarSeries;
use pattern_engine::patterns::label::{PatternFamily, PatternLabel};
use proptest::prelude::*;

/// `(low, spread, close position within the bar)` per bar.
fn arb_series() -> impl Strategy<Value = BarSeries> {
    proptest::collection::vec((1.0f64..100.0, 0.0f64..5.0, 0.0f64..=1.0), 0..40).prop_map(
        |rows| {
            let lows: Vec<f64> = rows.iter().map(|r| r.0).collect();
            let highs: Vec<f64> = rows.iter().map(|r| r.0 + r.1).collect();
            let closes: Vec<f64> = rows.iter().map(|r| r.0 + r.1 * r.2).collect();
            common::series("PROP", &highs, &lows, &closes)
        },
    )
}

/// Families whose rule reads both the previous and the next bar.
const TWO_SIDED: [PatternFamily; 3] = [
    PatternFamily::HeadAndShoulders,
    PatternFamily::DoubleTopBottom,
    PatternFamily::Pivot,
];

proptest! {
    #[test]
    fn nothing_fires_on_the_first_bar(series in arb_series(), window in 1usize..6) {
        let (_, patterns) = detect_patterns(&series, window, &DetectOptions::default()).unwrap();
        if let Some(first) = series.bars.first() {
            for (label, stamps) in patterns.iter() {
                prop_assert!(!stamps.contains(&first.timestamp), "{label} fired on bar 0");
            }
        }
    }

    #[test]
    fn two_sided_rules_never_fire_on_the_last_bar(series in arb_series(), window in 1usize..6) {
        let (_, patterns) = detect_patterns(&series, window, &DetectOptions::default()).unwrap();
        if let Some(last) = series.bars.last() {
            for (label, stamps) in patterns.iter() {
                if TWO_SIDED.contains(&label.family()) {
                    prop_assert!(
                        !stamps.contains(&last.timestamp),
                        "{label} fired on the last bar"
                    );
                }
            }
        }
    }

    #[test]
    fn at_most_one_label_per_family_per_bar(series in arb_series(), window in 1usize..6) {
        let (annotated, patterns) =
            detect_patterns(&series, window, &DetectOptions::default()).unwrap();

        let mut seen: BTreeMap<(DateTime<Utc>, PatternFamily), PatternLabel> = BTreeMap::new();
        for (label, stamps) in patterns.iter() {
            for &ts in stamps {
                let previous = seen.insert((ts, label.family()), label);
                prop_assert!(previous.is_none(), "{label} and {previous:?} on {ts}");
            }
        }
        for bar in &annotated.bars {
            for label in &bar.labels {
                prop_assert!(patterns.contains(*label, bar.bar.timestamp));
            }
        }
    }

    #[test]
    fn detection_is_deterministic(series in arb_series(), window in 1usize..6) {
        let options = DetectOptions::default();
        let first = detect_patterns(&series, window, &options).unwrap();
        let second = detect_patterns(&series, window, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
