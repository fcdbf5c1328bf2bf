use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snafu::{Backtrace, ResultExt, Snafu, ensure};
use tracing::info;

use crate::config::DetectOptions;
use crate::models::bar_series::is_file_safe_symbol;
use crate::patterns::annotated::{AnnotatedBar, AnnotatedSeries};
use crate::patterns::index::PatternIndex;

/// Everything a detection pass produced for one symbol, in export form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub symbol: String,
    pub window: usize,
    pub options: DetectOptions,
    pub patterns: PatternIndex,
    pub bars: Vec<AnnotatedBar>,
}

impl PatternReport {
    pub fn new(
        annotated: AnnotatedSeries,
        patterns: PatternIndex,
        window: usize,
        options: DetectOptions,
    ) -> Self {
        Self {
            symbol: annotated.symbol,
            window,
            options,
            patterns,
            bars: annotated.bars,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The report symbol cannot be used as a file name inside the sink directory.
    #[snafu(display("Invalid report symbol: {symbol:?}"))]
    InvalidSymbol { symbol: String, backtrace: Backtrace },

    /// The report could not be encoded for the destination.
    #[snafu(display("Failed to encode report: {source}"))]
    Encode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error at {path}: {source}"))]
    Io {
        path: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait ReportSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; a queue sink might return a message id.
    type Output;

    /// Writes one report to the destination.
    async fn write(&self, report: &PatternReport) -> Result<Self::Output, SinkError>;
}

/// Writes pretty-printed JSON reports to `<dir>/<symbol>_patterns.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}_patterns.json"))
    }
}

#[async_trait]
impl ReportSink for JsonFileSink {
    type Output = PathBuf;

    async fn write(&self, report: &PatternReport) -> Result<PathBuf, SinkError> {
        let symbol = report.symbol.as_str();
        ensure!(is_file_safe_symbol(symbol), InvalidSymbolSnafu { symbol });

        let body = serde_json::to_vec_pretty(report).context(EncodeSnafu)?;

        tokio::fs::create_dir_all(&self.dir).await.context(IoSnafu {
            path: self.dir.display().to_string(),
        })?;

        let path = self.path_for(symbol);
        tokio::fs::write(&path, body).await.context(IoSnafu {
            path: path.display().to_string(),
        })?;

        info!(
            symbol = %report.symbol,
            labels = report.patterns.len(),
            path = %path.display(),
            "wrote pattern report"
        );
        Ok(path)
    }
}
