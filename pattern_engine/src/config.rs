//! Detection parameters: parsing, validation, and loading.
//!
//! An [`EngineConfig`] is a TOML document with the rolling `window` at the top
//! level and the remaining knobs under `[options]`:
//!
//! ```toml
//! window = 3
//! [options]
//! double_top_bottom_threshold = 0.05
//! channel_range = 0.1
//! trendline_window = 2
//! band_std_multiplier = 2.0
//! ```
//!
//! Every field is optional and falls back to the reference defaults.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]
//! - Resolve from the environment: [`load_config_from_env`]

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared_utils::env::{get_env_var, parse_env_var};
use tracing::debug;

use crate::detectors::channel::DEFAULT_CHANNEL_RANGE;
use crate::detectors::double_top_bottom::DEFAULT_THRESHOLD;
use crate::detectors::support_resistance::DEFAULT_STD_MULTIPLIER;
use crate::detectors::trendline::DEFAULT_TRENDLINE_WINDOW;
use crate::errors::{ConfigError, ValidationError};

/// Environment variable holding the path of the config file.
pub const CONFIG_PATH_ENV: &str = "PATTERN_ENGINE_CONFIG";
/// Environment variable overriding the rolling window.
pub const WINDOW_ENV: &str = "PATTERN_ENGINE_WINDOW";

/// Default rolling window for the shape classifiers.
pub const DEFAULT_WINDOW: usize = 3;

/// Detector knobs that are independent of the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectOptions {
    /// Maximum neighbour range, as a fraction of its midpoint, for double tops/bottoms.
    pub double_top_bottom_threshold: f64,
    /// Maximum rolling range, as a fraction of its midpoint, for channels.
    pub channel_range: f64,
    /// Number of preceding closes per trendline fit.
    pub trendline_window: usize,
    /// Standard deviations between the rolling mean and the support/resistance band.
    pub band_std_multiplier: f64,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            double_top_bottom_threshold: DEFAULT_THRESHOLD,
            channel_range: DEFAULT_CHANNEL_RANGE,
            trendline_window: DEFAULT_TRENDLINE_WINDOW,
            band_std_multiplier: DEFAULT_STD_MULTIPLIER,
        }
    }
}

impl DetectOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("double_top_bottom_threshold", self.double_top_bottom_threshold),
            ("channel_range", self.channel_range),
            ("band_std_multiplier", self.band_std_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidRatio { name, value });
            }
        }
        if self.trendline_window < 2 {
            return Err(ValidationError::InvalidWindow {
                name: "trendline_window",
                value: self.trendline_window,
                min: 2,
            });
        }
        Ok(())
    }
}

/// Checks the rolling window size.
pub fn validate_window(window: usize) -> Result<(), ValidationError> {
    if window == 0 {
        return Err(ValidationError::InvalidWindow {
            name: "window",
            value: window,
            min: 1,
        });
    }
    Ok(())
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub window: usize,
    pub options: DetectOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            options: DetectOptions::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_window(self.window)?;
        self.options.validate()
    }
}

/// Parse and validate a config from a TOML string.
///
/// Errors:
/// - TOML parse failures, including unknown keys
/// - Out-of-range values (see [`EngineConfig::validate`])
pub fn load_config_str(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Read a config TOML file from disk, parse, and validate it.
pub fn load_config_path(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_config_str(&text)
}

/// Resolve the config from the environment.
///
/// Loads the file named by [`CONFIG_PATH_ENV`] when set, defaults otherwise,
/// then applies [`WINDOW_ENV`] on top.
pub fn load_config_from_env() -> Result<EngineConfig, ConfigError> {
    let mut config = match get_env_var(CONFIG_PATH_ENV) {
        Ok(path) => {
            debug!(%path, "loading pattern engine config");
            load_config_path(path)?
        }
        Err(_) => EngineConfig::default(),
    };
    if let Some(window) = parse_env_var::<usize>(WINDOW_ENV)? {
        debug!(window, "window overridden from environment");
        config.window = window;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = load_config_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.window, 3);
        assert_eq!(config.options.double_top_bottom_threshold, 0.05);
        assert_eq!(config.options.channel_range, 0.1);
        assert_eq!(config.options.trendline_window, 2);
    }

    #[test]
    fn partial_options_keep_other_defaults() {
        let config = load_config_str(
            r#"
            window = 5
            [options]
            channel_range = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.window, 5);
        assert_eq!(config.options.channel_range, 0.2);
        assert_eq!(config.options.band_std_multiplier, 2.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_config_str("windw = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_window_is_invalid() {
        let err = load_config_str("window = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::InvalidWindow { name: "window", .. })
        ));
    }

    #[test]
    fn single_point_trendline_is_invalid() {
        let options = DetectOptions {
            trendline_window: 1,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn negative_ratio_is_invalid() {
        let options = DetectOptions {
            channel_range: -0.1,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(ValidationError::InvalidRatio {
                name: "channel_range",
                value: -0.1
            })
        );
    }
}
