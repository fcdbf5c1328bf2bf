#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pattern_engine::models::{bar::Bar, bar_series::BarSeries};

pub fn day(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
}

/// Daily bars from parallel high/low/close columns; open mirrors close.
pub fn series(symbol: &str, highs: &[f64], lows: &[f64], closes: &[f64]) -> BarSeries {
    assert_eq!(highs.len(), lows.len());
    assert_eq!(highs.len(), closes.len());
    let bars = (0..highs.len())
        .map(|i| Bar::new(day(i), closes[i], highs[i], lows[i], closes[i], 1_000.0))
        .collect();
    BarSeries::new(symbol, bars)
}

pub fn days(indices: &[usize]) -> Vec<DateTime<Utc>> {
    indices.iter().map(|&i| day(i)).collect()
}
