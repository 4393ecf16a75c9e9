use std::num::NonZeroU32;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::SiteConfiguration;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn default_latitude() -> f64 { 45.523097 }
fn default_longitude() -> f64 { -122.681325 }
fn default_elevation() -> f64 { 17.0 }
fn default_tilt() -> f64 { 45.0 }
fn default_zenith_limit() -> f64 { 100.0 }
fn default_start() -> String { "2017-01-01T00:00".to_string() }
fn default_end() -> String { "2018-01-01T00:00".to_string() }
fn default_interval() -> i64 { 10 }

/// Run parameters as they appear in a JSON configuration file. Timestamps are
/// UTC with minute precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_elevation")]
    pub elevation: f64,
    #[serde(default = "default_tilt")]
    pub tilt: f64,
    #[serde(default)]
    pub azimuth: f64,
    #[serde(default)]
    pub zenith_filter: bool,
    #[serde(default = "default_zenith_limit")]
    pub zenith_limit: f64,
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default = "default_end")]
    pub end: String,
    #[serde(default = "default_interval")]
    pub interval_minutes: i64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            elevation: default_elevation(),
            tilt: default_tilt(),
            azimuth: 0.0,
            zenith_filter: false,
            zenith_limit: default_zenith_limit(),
            start: default_start(),
            end: default_end(),
            interval_minutes: default_interval(),
        }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_site(&self) -> std::result::Result<SiteConfiguration, ConfigError> {
        let start = parse_timestamp("start", &self.start)?;
        let end = parse_timestamp("end", &self.end)?;
        let interval_minutes = u32::try_from(self.interval_minutes)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigError::NonPositiveInterval(self.interval_minutes))?;
        let site = SiteConfiguration {
            latitude: self.latitude,
            longitude: self.longitude,
            elevation: self.elevation,
            tilt: self.tilt,
            azimuth: self.azimuth,
            zenith_filter: self.zenith_filter,
            zenith_limit: self.zenith_limit,
            start,
            end,
            interval_minutes,
        };
        site.validate()?;
        Ok(site)
    }
}

pub fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> std::result::Result<DateTime<Utc>, ConfigError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| ConfigError::MalformedTimestamp {
            field,
            value: value.to_string(),
            source,
        })
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}
