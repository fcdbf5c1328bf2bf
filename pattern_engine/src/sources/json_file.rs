use std::path::{Path, PathBuf};

use async_trait::async_trait;
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::models::bar::Bar;
use crate::models::bar_series::{BarSeries, is_file_safe_symbol};
use crate::sources::{
    BarSource, DecodeSnafu, InvalidSeriesSnafu, InvalidSymbolSnafu, ReadSnafu, SeriesRequest,
    SourceError,
};

/// Reads `<dir>/<SYMBOL>.json`, a JSON array of bars in ascending time order.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.json"))
    }
}

/// Load a series straight from a JSON file of bars.
///
/// The symbol is taken from the file stem; `request.symbol` is ignored while its
/// range and limit are applied as [`SeriesRequest::apply`] does.
pub async fn read_series_file(
    path: &Path,
    request: &SeriesRequest,
) -> Result<BarSeries, SourceError> {
    let symbol = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bars = request.apply(read_bars(path).await?);
    let series = BarSeries::new(symbol.clone(), bars);
    series.validate().context(InvalidSeriesSnafu { symbol })?;
    Ok(series)
}

async fn read_bars(path: &Path) -> Result<Vec<Bar>, SourceError> {
    let display = path.display().to_string();
    let text = tokio::fs::read_to_string(path)
        .await
        .context(ReadSnafu { path: display.clone() })?;
    serde_json::from_str(&text).context(DecodeSnafu { path: display })
}

#[async_trait]
impl BarSource for JsonFileSource {
    async fn fetch_series(&self, request: &SeriesRequest) -> Result<BarSeries, SourceError> {
        let symbol = request.symbol.trim();
        ensure!(is_file_safe_symbol(symbol), InvalidSymbolSnafu { symbol });

        let path = self.path_for(symbol);
        let bars = request.apply(read_bars(&path).await?);
        debug!(symbol, path = %path.display(), bars = bars.len(), "loaded bars from file");

        let series = BarSeries::new(symbol, bars);
        series.validate().context(InvalidSeriesSnafu { symbol })?;
        Ok(series)
    }
}
