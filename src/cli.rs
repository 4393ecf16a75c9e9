use std::path::PathBuf;

use clap::Parser;

use solar_incidence::provider::Model;
use solar_incidence::RunConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// JSON run configuration; flags below override its fields
    #[arg(long, short, env = "SOLAR_INCIDENCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Site latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, env = "SOLAR_INCIDENCE_LATITUDE")]
    pub latitude: Option<f64>,
    /// Site longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, env = "SOLAR_INCIDENCE_LONGITUDE")]
    pub longitude: Option<f64>,
    /// Site elevation above sea level (meters)
    #[arg(long, allow_hyphen_values = true, env = "SOLAR_INCIDENCE_ELEVATION")]
    pub elevation: Option<f64>,

    /// Surface tilt from horizontal in degrees (0 = flat, 90 = vertical)
    #[arg(long, value_parser = parse_tilt, env = "SOLAR_INCIDENCE_TILT")]
    pub tilt: Option<f64>,
    /// Surface azimuth in degrees, south-referenced, counter-clockwise positive
    #[arg(long, allow_hyphen_values = true, env = "SOLAR_INCIDENCE_AZIMUTH")]
    pub azimuth: Option<f64>,

    /// Clamp zenith angles above --zenith-limit before computing incidence
    /// (`--zenith-filter=false` turns off a filter enabled in the config file)
    #[arg(long, num_args = 0..=1, default_missing_value = "true", env = "SOLAR_INCIDENCE_ZENITH_FILTER")]
    pub zenith_filter: Option<bool>,
    /// Zenith ceiling in degrees used by --zenith-filter
    #[arg(long, env = "SOLAR_INCIDENCE_ZENITH_LIMIT")]
    pub zenith_limit: Option<f64>,

    /// First timestamp, UTC (YYYY-MM-DDTHH:MM)
    #[arg(long, env = "SOLAR_INCIDENCE_START")]
    pub start: Option<String>,
    /// Last timestamp, UTC (YYYY-MM-DDTHH:MM), included when reached exactly
    #[arg(long, env = "SOLAR_INCIDENCE_END")]
    pub end: Option<String>,
    /// Step between timestamps in minutes
    #[arg(long, allow_hyphen_values = true, env = "SOLAR_INCIDENCE_INTERVAL")]
    pub interval: Option<i64>,

    /// Sun position model
    #[arg(long, value_enum, default_value = "almanac", env = "SOLAR_INCIDENCE_MODEL")]
    pub model: Model,

    /// Write the series as CSV to this file
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Write overlay and stacked SVG charts into this directory
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(v) = self.latitude {
            config.latitude = v;
        }
        if let Some(v) = self.longitude {
            config.longitude = v;
        }
        if let Some(v) = self.elevation {
            config.elevation = v;
        }
        if let Some(v) = self.tilt {
            config.tilt = v;
        }
        if let Some(v) = self.azimuth {
            config.azimuth = v;
        }
        if let Some(v) = self.zenith_filter {
            config.zenith_filter = v;
        }
        if let Some(v) = self.zenith_limit {
            config.zenith_limit = v;
        }
        if let Some(v) = &self.start {
            config.start = v.clone();
        }
        if let Some(v) = &self.end {
            config.end = v.clone();
        }
        if let Some(v) = self.interval {
            config.interval_minutes = v;
        }
        config
    }
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_tilt(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..=180.0).contains(&v) {
        return Err(format!("Tilt must be between 0 and 180 degrees, got {}", v));
    }
    Ok(v)
}
