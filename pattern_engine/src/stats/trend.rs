use serde::{Deserialize, Serialize};

/// Direction of a window, from the sign of `last - first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    /// Only when `last - first` is exactly zero.
    Flat,
}

impl TrendDirection {
    /// Classify the move from `first` to `last`.
    #[inline]
    pub fn between(first: f64, last: f64) -> Self {
        let delta = last - first;
        if delta > 0.0 {
            TrendDirection::Up
        } else if delta < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}
