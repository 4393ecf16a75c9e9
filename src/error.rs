use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("solar position unavailable at {timestamp}: {source}")]
    Provider {
        timestamp: DateTime<Utc>,
        #[source]
        source: ProviderError,
    },

    #[error(
        "incident angle undefined at {timestamp}: arccos argument {argument} outside [-1, 1] \
         (tilt {tilt}°, surface-solar azimuth {gamma}°)"
    )]
    NumericDomain {
        timestamp: DateTime<Utc>,
        argument: f64,
        tilt: f64,
        gamma: f64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Rejected before any computation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("start {start} is after end {end}")]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("interval must be a positive number of minutes, got {0}")]
    NonPositiveInterval(i64),

    #[error("malformed {field} timestamp {value:?} (expected YYYY-MM-DDTHH:MM)")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unreadable configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("invalid latitude {0}° (must be between -90° and +90°)")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}° (must be between -180° and +180°)")]
    InvalidLongitude(f64),

    #[error("non-finite {0} input")]
    NonFinite(&'static str),

    #[error("year {year} outside supported range {min}..={max}")]
    UnsupportedDate { year: i32, min: i32, max: i32 },
}
