//! A collection of time-series bars for a specific symbol.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, models::bar::Bar};

/// An ordered, read-only run of [`Bar`]s for one symbol.
///
/// Timestamps are expected to be strictly increasing; [`BarSeries::validate`]
/// enforces this before detection. Missing sessions are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL", "ESU24").
    pub symbol: String,
    /// The collection of OHLCV bars, oldest first.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Checks the ordering and numeric contract of the series.
    ///
    /// Errors:
    /// - [`ValidationError::NonFinitePrice`] for a NaN/infinite OHLC field
    /// - [`ValidationError::DuplicateTimestamp`] when a bar repeats its predecessor's timestamp
    /// - [`ValidationError::NonMonotonicTimestamp`] when a bar is older than its predecessor
    ///
    /// The reported index is the first offending bar.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (index, bar) in self.bars.iter().enumerate() {
            if let Some(field) = bar.non_finite_field() {
                return Err(ValidationError::NonFinitePrice { index, field });
            }
            if index == 0 {
                continue;
            }
            let previous = self.bars[index - 1].timestamp;
            match bar.timestamp.cmp(&previous) {
                Ordering::Greater => {}
                Ordering::Equal => {
                    return Err(ValidationError::DuplicateTimestamp {
                        index,
                        timestamp: bar.timestamp,
                    });
                }
                Ordering::Less => {
                    return Err(ValidationError::NonMonotonicTimestamp {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Whether `symbol` can name a file inside a data or report directory.
///
/// Rejects empty names, `.`/`..`, and anything holding a path separator, drive
/// colon or NUL, so joining it onto a directory never leaves that directory.
pub fn is_file_safe_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol != "."
        && symbol != ".."
        && !symbol.contains(['/', '\\', ':', '\0'])
}
