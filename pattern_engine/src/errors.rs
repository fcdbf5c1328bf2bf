use chrono::{DateTime, Utc};
use shared_utils::env::InvalidEnvVarError;
use thiserror::Error;

/// Input-contract violations detected before any detector runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A bar's timestamp is earlier than the bar before it.
    #[error("Timestamp at index {index} ({current}) is earlier than the previous bar ({previous})")]
    NonMonotonicTimestamp {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// A bar repeats the timestamp of the bar before it.
    #[error("Duplicate timestamp at index {index}: {timestamp}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    /// An OHLC field is NaN or infinite.
    #[error("Non-finite {field} price at index {index}")]
    NonFinitePrice { index: usize, field: &'static str },

    /// A window parameter is below its minimum.
    #[error("Invalid {name}: {value} (must be >= {min})")]
    InvalidWindow {
        name: &'static str,
        value: usize,
        min: usize,
    },

    /// A ratio or multiplier is negative, NaN or infinite.
    #[error("Invalid {name}: {value} (must be finite and >= 0)")]
    InvalidRatio { name: &'static str, value: f64 },
}

/// Errors raised while loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected shape.
    #[error("Failed to parse config TOML")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds out-of-range values.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    /// An environment override is present but unparsable.
    #[error(transparent)]
    InvalidEnvVar(#[from] InvalidEnvVarError),
}

/// The unified error type for the `pattern_engine` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The input series or the detection parameters violate the engine contract.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
