//! Right-aligned simple moving-window statistics.
//!
//! Every statistic at index `i` covers bars `[i - W + 1, i]` and is `None` for
//! `i < W - 1`. "Not available" is never encoded as zero; detectors treat `None`
//! as "condition false".

use std::collections::VecDeque;

use crate::models::bar::Bar;
use crate::stats::trend::TrendDirection;

/// Sliding accumulator over the most recent `size` values.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    size: usize,
    values: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: VecDeque::with_capacity(size),
        }
    }

    /// Push a value, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        if self.size == 0 {
            return;
        }
        if self.values.len() == self.size {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn is_full(&self) -> bool {
        self.size > 0 && self.values.len() == self.size
    }

    pub fn max(&self) -> Option<f64> {
        self.full_values().map(|v| v.fold(f64::NEG_INFINITY, f64::max))
    }

    pub fn min(&self) -> Option<f64> {
        self.full_values().map(|v| v.fold(f64::INFINITY, f64::min))
    }

    pub fn mean(&self) -> Option<f64> {
        self.full_values().map(|v| v.sum::<f64>() / self.size as f64)
    }

    /// Sample standard deviation (N-1 denominator). `None` for a one-value window.
    pub fn sample_std(&self) -> Option<f64> {
        if self.size < 2 {
            return None;
        }
        let mean = self.mean()?;
        let sum_sq: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((sum_sq / (self.size - 1) as f64).sqrt())
    }

    /// Direction from the oldest to the newest value in the window.
    pub fn trend(&self) -> Option<TrendDirection> {
        if !self.is_full() {
            return None;
        }
        let first = *self.values.front()?;
        let last = *self.values.back()?;
        Some(TrendDirection::between(first, last))
    }

    fn full_values(&self) -> Option<impl Iterator<Item = f64> + '_> {
        self.is_full().then(|| self.values.iter().copied())
    }
}

/// Per-bar rolling statistics for one window size.
///
/// All vectors have the same length as the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindowStats {
    pub window: usize,
    pub high_roll_max: Vec<Option<f64>>,
    pub low_roll_min: Vec<Option<f64>>,
    pub close_roll_max: Vec<Option<f64>>,
    pub close_roll_min: Vec<Option<f64>>,
    pub mean_high: Vec<Option<f64>>,
    pub std_high: Vec<Option<f64>>,
    pub mean_low: Vec<Option<f64>>,
    pub std_low: Vec<Option<f64>>,
    pub trend_high: Vec<Option<TrendDirection>>,
    pub trend_low: Vec<Option<TrendDirection>>,
}

impl RollingWindowStats {
    /// Compute every rolling statistic in one pass over `bars`.
    pub fn compute(bars: &[Bar], window: usize) -> Self {
        let n = bars.len();
        let mut stats = Self {
            window,
            high_roll_max: Vec::with_capacity(n),
            low_roll_min: Vec::with_capacity(n),
            close_roll_max: Vec::with_capacity(n),
            close_roll_min: Vec::with_capacity(n),
            mean_high: Vec::with_capacity(n),
            std_high: Vec::with_capacity(n),
            mean_low: Vec::with_capacity(n),
            std_low: Vec::with_capacity(n),
            trend_high: Vec::with_capacity(n),
            trend_low: Vec::with_capacity(n),
        };

        let mut highs = RollingWindow::new(window);
        let mut lows = RollingWindow::new(window);
        let mut closes = RollingWindow::new(window);

        for bar in bars {
            highs.push(bar.high);
            lows.push(bar.low);
            closes.push(bar.close);

            stats.high_roll_max.push(highs.max());
            stats.low_roll_min.push(lows.min());
            stats.close_roll_max.push(closes.max());
            stats.close_roll_min.push(closes.min());
            stats.mean_high.push(highs.mean());
            stats.std_high.push(highs.sample_std());
            stats.mean_low.push(lows.mean());
            stats.std_low.push(lows.sample_std());
            stats.trend_high.push(highs.trend());
            stats.trend_low.push(lows.trend());
        }

        stats
    }

    pub fn len(&self) -> usize {
        self.high_roll_max.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high_roll_max.is_empty()
    }

    /// Whether the window ending at `index` is complete.
    pub fn is_available(&self, index: usize) -> bool {
        self.high_roll_max.get(index).is_some_and(Option::is_some)
    }
}
