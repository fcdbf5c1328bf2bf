use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use pattern_engine::config::{EngineConfig, load_config_from_env, load_config_path};
use pattern_engine::engine::detect_patterns;
use pattern_engine::io::sink::{JsonFileSink, PatternReport, ReportSink};
use pattern_engine::models::bar_series::BarSeries;
use pattern_engine::prompt::{build_commentary_prompt, render_pattern_summary};
use pattern_engine::sources::json_file::{JsonFileSource, read_series_file};
use pattern_engine::sources::{BarSource, SeriesRequest};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Scan OHLC bars for chart patterns")]
struct Cli {
    /// JSON file holding an array of bars.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["data_dir", "symbol"])]
    input: Option<PathBuf>,

    /// Directory of `<SYMBOL>.json` bar files.
    #[arg(long, value_name = "DIR", requires = "symbol")]
    data_dir: Option<PathBuf>,

    #[arg(long, requires = "data_dir")]
    symbol: Option<String>,

    /// Engine config TOML. Falls back to PATTERN_ENGINE_CONFIG, then defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rolling window size; overrides the config.
    #[arg(long)]
    window: Option<usize>,

    /// Only scan the most recent N bars.
    #[arg(long)]
    limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Also write `<symbol>_patterns.json` into this directory.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Summary,
    Prompt,
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => load_config_from_env()?,
    };
    if let Some(window) = cli.window {
        config.window = window;
    }
    config.validate()?;
    Ok(config)
}

async fn load_series(cli: &Cli) -> Result<BarSeries> {
    let request = SeriesRequest {
        symbol: cli.symbol.clone().unwrap_or_default(),
        limit: cli.limit,
        ..Default::default()
    };
    match (&cli.input, &cli.data_dir) {
        (Some(path), _) => {
            let series = read_series_file(path, &request)
                .await
                .with_context(|| format!("loading {}", path.display()))?;
            Ok(series)
        }
        (None, Some(dir)) => {
            let series = JsonFileSource::new(dir).fetch_series(&request).await?;
            Ok(series)
        }
        _ => bail!("either --input or --data-dir with --symbol is required"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pattern_engine=info,pattern_scan=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let series = load_series(&cli).await?;
    info!(symbol = %series.symbol, bars = series.len(), window = config.window, "scanning");

    let (annotated, patterns) = detect_patterns(&series, config.window, &config.options)?;

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&patterns)?),
        Format::Summary => println!("{}", render_pattern_summary(&patterns)),
        Format::Prompt => println!("{}", build_commentary_prompt(&series.symbol, &patterns)),
    }

    if let Some(dir) = &cli.output {
        let report = PatternReport::new(annotated, patterns, config.window, config.options);
        let path = JsonFileSink::new(dir).write(&report).await?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
