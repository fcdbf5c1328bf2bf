//! Chart-pattern detection over OHLC bar series.
//!
//! The engine is a pure batch transformation: a [`BarSeries`](models::bar_series::BarSeries)
//! goes in, an [`AnnotatedSeries`](patterns::annotated::AnnotatedSeries) and a
//! [`PatternIndex`](patterns::index::PatternIndex) come out. Data fetching, export and
//! narrative commentary live behind the [`sources`], [`io`] and [`prompt`] seams.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pattern_engine::config::DetectOptions;
//! use pattern_engine::engine::detect_patterns;
//! use pattern_engine::models::{bar::Bar, bar_series::BarSeries};
//! use pattern_engine::patterns::label::PatternLabel;
//!
//! let bars = (0..5)
//!     .map(|i| {
//!         let ts = Utc.with_ymd_and_hms(2024, 1, 1 + i, 0, 0, 0).unwrap();
//!         Bar::new(ts, 1.0, 10.0, 5.0, 1.0 + i as f64, 100.0)
//!     })
//!     .collect();
//! let series = BarSeries::new("DEMO", bars);
//! let (_annotated, patterns) = detect_patterns(&series, 3, &DetectOptions::default()).unwrap();
//! assert!(patterns.get(PatternLabel::AscendingTriangle).is_some());
//! ```

pub mod config;
pub mod detectors;
pub mod engine;
pub mod errors;
pub mod io;
pub mod models;
pub mod patterns;
pub mod prompt;
pub mod sources;
pub mod stats;
