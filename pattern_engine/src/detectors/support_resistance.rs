//! Bollinger-style support/resistance band.
//!
//! Not an event detector: every bar with a complete window and a defined sample
//! standard deviation gets `mean_low - k·std_low` and `mean_high + k·std_high`.

use serde::{Deserialize, Serialize};

use crate::detectors::at;
use crate::stats::rolling::RollingWindowStats;

/// Default number of standard deviations.
pub const DEFAULT_STD_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceBand {
    pub support: f64,
    pub resistance: f64,
}

/// Band values per bar; `None` where the window is incomplete or has a single value.
pub fn support_resistance_bands(
    stats: &RollingWindowStats,
    std_multiplier: f64,
) -> Vec<Option<SupportResistanceBand>> {
    (0..stats.len())
        .map(|i| {
            let mean_low = at(&stats.mean_low, i)?;
            let std_low = at(&stats.std_low, i)?;
            let mean_high = at(&stats.mean_high, i)?;
            let std_high = at(&stats.std_high, i)?;
            Some(SupportResistanceBand {
                support: mean_low - std_multiplier * std_low,
                resistance: mean_high + std_multiplier * std_high,
            })
        })
        .collect()
}
