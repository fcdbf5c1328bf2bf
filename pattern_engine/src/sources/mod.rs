//! Bar source abstraction.
//!
//! This module defines the [`BarSource`] trait, the seam between the engine and
//! whatever supplies OHLC history (a market-data REST API, a cache, a file dump).
//! Implementations normalize their payload into a [`BarSeries`] that already
//! satisfies the engine's ordering contract.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn BarSource`) for runtime selection of sources.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use pattern_engine::models::bar_series::BarSeries;
//! use pattern_engine::sources::{BarSource, SeriesRequest, SourceError};
//!
//! struct EmptySource;
//!
//! #[async_trait]
//! impl BarSource for EmptySource {
//!     async fn fetch_series(&self, request: &SeriesRequest) -> Result<BarSeries, SourceError> {
//!         Ok(BarSeries::new(request.symbol.clone(), vec![]))
//!     }
//! }
//! ```

pub mod json_file;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::{Backtrace, Snafu};

use crate::errors::ValidationError;
use crate::models::{bar::Bar, bar_series::BarSeries};

/// Parameters for fetching one symbol's history.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Symbol to request (e.g., `"AAPL"`).
    pub symbol: String,

    /// Start of the requested range (inclusive, UTC).
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,

    /// End of the requested range (exclusive, UTC).
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,

    /// Keep only the most recent `limit` bars. Bounds the work of a detection pass.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SeriesRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Apply the time range, then the limit, to bars in ascending order.
    pub fn apply(&self, bars: Vec<Bar>) -> Vec<Bar> {
        let mut kept: Vec<Bar> = bars
            .into_iter()
            .filter(|b| self.start.is_none_or(|s| b.timestamp >= s))
            .filter(|b| self.end.is_none_or(|e| b.timestamp < e))
            .collect();
        if let Some(limit) = self.limit {
            let excess = kept.len().saturating_sub(limit);
            kept.drain(..excess);
        }
        kept
    }
}

/// Fetches OHLC history for the engine.
#[async_trait]
pub trait BarSource {
    /// Fetch the bars for `request.symbol`, oldest first.
    async fn fetch_series(&self, request: &SeriesRequest) -> Result<BarSeries, SourceError>;
}

/// Errors that can occur within a [`BarSource`] implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    /// The symbol is empty or cannot be used to address the backing store.
    #[snafu(display("Invalid symbol: {symbol:?}"))]
    InvalidSymbol { symbol: String, backtrace: Backtrace },

    /// The backing file could not be read.
    #[snafu(display("Failed to read {path}: {source}"))]
    Read {
        path: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The payload is not a list of bars.
    #[snafu(display("Failed to decode bars from {path}: {source}"))]
    Decode {
        path: String,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The bars violate the series contract (ordering, finite prices).
    #[snafu(display("Invalid series for {symbol}: {source}"))]
    InvalidSeries {
        symbol: String,
        source: ValidationError,
        backtrace: Backtrace,
    },
}
