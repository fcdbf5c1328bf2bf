//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! Every [`BarSource`](crate::sources::BarSource) normalizes its vendor payload into
//! this shape before the engine sees it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// The timestamp for this bar (UTC), serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// High minus low.
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Midpoint of the high/low range.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// First OHLC field that is NaN or infinite, if any.
    pub(crate) fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn range_and_midpoint() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let bar = Bar::new(ts, 10.0, 12.0, 8.0, 11.0, 0.0);
        assert_eq!(bar.range(), 4.0);
        assert_eq!(bar.midpoint(), 10.0);
    }

    #[test]
    fn deserializes_without_volume() {
        let json = r#"{
            "timestamp": "2024-05-01T00:00:00Z",
            "open": 1, "high": 2, "low": 0.5, "close": 1.5
        }"#;
        let bar: Bar = serde_json::from_str(json).unwrap();
        assert_eq!(bar.volume, 0.0);
        assert_eq!(bar.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn flags_first_non_finite_field() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let bar = Bar::new(ts, 1.0, f64::NAN, 0.5, f64::INFINITY, 0.0);
        assert_eq!(bar.non_finite_field(), Some("high"));
    }
}
