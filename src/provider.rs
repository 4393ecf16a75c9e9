//! Sun coordinates for a UTC instant and an observer.
//!
//! [`Almanac`] follows the low-precision formulae of the Astronomical Almanac
//! (about 0.01° between 1950 and 2050) and applies topocentric parallax for
//! the observer elevation. [`Seasonal`] is the textbook engineering model
//! built from day-of-year declination and equation of time.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use clap::ValueEnum;

use crate::angles::{
    self, deg_to_rad, normalize_angle, normalize_hour_angle, rad_to_deg,
};
use crate::error::ProviderError;
use crate::types::SunCoordinates;

const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_140.0;
const SOLAR_PARALLAX_DEG: f64 = 8.794 / 3600.0;

pub trait SolarPositionProvider {
    fn sun_coordinates(
        &self,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<SunCoordinates, ProviderError>;
}

impl<F> SolarPositionProvider for F
where
    F: Fn(DateTime<Utc>, f64, f64, f64) -> Result<SunCoordinates, ProviderError>,
{
    fn sun_coordinates(
        &self,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<SunCoordinates, ProviderError> {
        self(timestamp, latitude, longitude, elevation)
    }
}

fn check_observer(latitude: f64, longitude: f64, elevation: f64) -> Result<(), ProviderError> {
    if !latitude.is_finite() {
        return Err(ProviderError::NonFinite("latitude"));
    }
    if !longitude.is_finite() {
        return Err(ProviderError::NonFinite("longitude"));
    }
    if !elevation.is_finite() {
        return Err(ProviderError::NonFinite("elevation"));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ProviderError::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ProviderError::InvalidLongitude(longitude));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Almanac;

impl Almanac {
    pub const MIN_YEAR: i32 = 1900;
    pub const MAX_YEAR: i32 = 2100;
}

impl SolarPositionProvider for Almanac {
    fn sun_coordinates(
        &self,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<SunCoordinates, ProviderError> {
        check_observer(latitude, longitude, elevation)?;
        let year = timestamp.year();
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(ProviderError::UnsupportedDate {
                year,
                min: Self::MIN_YEAR,
                max: Self::MAX_YEAR,
            });
        }

        let n = angles::days_since_j2000(&timestamp);
        let mean_longitude = normalize_angle(280.460 + 0.9856474 * n);
        let g = deg_to_rad(normalize_angle(357.528 + 0.9856003 * n));
        let ecliptic_longitude = deg_to_rad(normalize_angle(
            mean_longitude + 1.915 * g.sin() + 0.020 * (2.0 * g).sin(),
        ));
        let obliquity = deg_to_rad(23.439 - 0.0000004 * n);

        let right_ascension = normalize_angle(rad_to_deg(
            (obliquity.cos() * ecliptic_longitude.sin()).atan2(ecliptic_longitude.cos()),
        ));
        let declination = rad_to_deg((obliquity.sin() * ecliptic_longitude.sin()).asin());

        let local_sidereal = angles::greenwich_mean_sidereal_time(n) + longitude;
        let hour_angle = normalize_hour_angle(local_sidereal - right_ascension);

        let geocentric_zenith = angles::solar_zenith_angle(latitude, declination, hour_angle);
        let azimuth = angles::solar_azimuth(latitude, declination, hour_angle);

        // Earth-sun distance in AU.
        let distance = 1.00014 - 0.01671 * g.cos() - 0.00014 * (2.0 * g).cos();
        let observer = (EARTH_EQUATORIAL_RADIUS_M + elevation) / EARTH_EQUATORIAL_RADIUS_M;
        let parallax =
            SOLAR_PARALLAX_DEG / distance * observer * deg_to_rad(geocentric_zenith).sin();

        Ok(SunCoordinates {
            azimuth,
            zenith: geocentric_zenith + parallax,
            right_ascension,
            declination,
            hour_angle,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Seasonal;

impl SolarPositionProvider for Seasonal {
    fn sun_coordinates(
        &self,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<SunCoordinates, ProviderError> {
        check_observer(latitude, longitude, elevation)?;
        let n = angles::day_of_year_utc(&timestamp);
        let eot = angles::equation_of_time(n);
        let declination = angles::solar_declination(n);
        let correction = angles::utc_lst_correction(longitude, eot);
        let lst = (angles::utc_hours(&timestamp) + correction).rem_euclid(24.0);
        let hour_angle = normalize_hour_angle(angles::hour_angle(lst));

        let sidereal = angles::greenwich_mean_sidereal_time(angles::days_since_j2000(&timestamp));
        let right_ascension = normalize_angle(sidereal + longitude - hour_angle);

        Ok(SunCoordinates {
            azimuth: angles::solar_azimuth(latitude, declination, hour_angle),
            zenith: angles::solar_zenith_angle(latitude, declination, hour_angle),
            right_ascension,
            declination,
            hour_angle,
        })
    }
}

/// Provider choice for callers that pick the model at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Model {
    #[default]
    Almanac,
    Seasonal,
}

impl Model {
    pub fn name(self) -> &'static str {
        match self {
            Model::Almanac => "almanac",
            Model::Seasonal => "seasonal",
        }
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

impl SolarPositionProvider for Model {
    fn sun_coordinates(
        &self,
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<SunCoordinates, ProviderError> {
        match self {
            Model::Almanac => Almanac.sun_coordinates(timestamp, latitude, longitude, elevation),
            Model::Seasonal => Seasonal.sun_coordinates(timestamp, latitude, longitude, elevation),
        }
    }
}
