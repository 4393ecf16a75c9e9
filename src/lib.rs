pub mod angles;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod incidence;
pub mod provider;
pub mod series;
pub mod types;

pub use angles::{
    day_of_year, deg_to_rad, equation_of_time, greenwich_mean_sidereal_time, hour_angle,
    incidence_cosine, julian_day, normalize_angle, normalize_hour_angle, rad_to_deg,
    solar_altitude, solar_azimuth, solar_declination, solar_zenith_angle, surface_solar_azimuth,
    DEGREES_PER_HOUR, EARTH_AXIAL_TILT,
};

pub use chart::{chart_documents, render_charts, render_overlay, render_stacked, write_charts};

pub use config::{parse_timestamp, RunConfig, TIMESTAMP_FORMAT};

pub use error::{ConfigError, Error, ProviderError, Result};

pub use export::{
    csv_bytes, persist, read_csv, read_csv_file, write_csv, write_csv_file, CsvRow,
};

pub use incidence::IncidentAngleCalculator;

pub use provider::{Almanac, Model, Seasonal, SolarPositionProvider};

pub use series::{build, generate, SolarPositionSeriesBuilder, TimeSeries, Timestamps};

pub use types::{
    SeriesColumns, SiteConfiguration, SolarPositionRecord, SolarPositionSeries, SunCoordinates,
};
