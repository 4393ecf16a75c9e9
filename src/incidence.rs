use chrono::{DateTime, TimeZone, Utc};

use crate::angles::{self, rad_to_deg};
use crate::error::{Error, Result};
use crate::provider::SolarPositionProvider;
use crate::types::{SiteConfiguration, SolarPositionRecord};

#[derive(Debug, Clone, Default)]
pub struct IncidentAngleCalculator<P> {
    provider: P,
}

impl<P: SolarPositionProvider> IncidentAngleCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn compute<Tz: TimeZone>(
        &self,
        timestamp: &DateTime<Tz>,
        site: &SiteConfiguration,
    ) -> Result<SolarPositionRecord> {
        let timestamp = timestamp.with_timezone(&Utc);
        let sun = self
            .provider
            .sun_coordinates(timestamp, site.latitude, site.longitude, site.elevation)
            .map_err(|source| Error::Provider { timestamp, source })?;

        let gamma = angles::surface_solar_azimuth(sun.azimuth, site.azimuth);
        let zenith = clamp_zenith(sun.zenith, site);
        let argument = angles::incidence_cosine(zenith, site.tilt, gamma);
        let incident_angle = rad_to_deg(checked_acos(argument).ok_or_else(|| {
            Error::NumericDomain {
                timestamp,
                argument,
                tilt: site.tilt,
                gamma,
            }
        })?);

        Ok(SolarPositionRecord {
            timestamp,
            azimuth: sun.azimuth,
            zenith,
            right_ascension: sun.right_ascension,
            declination: sun.declination,
            hour_angle: sun.hour_angle,
            incident_angle,
        })
    }
}

pub fn clamp_zenith(zenith: f64, site: &SiteConfiguration) -> f64 {
    if site.zenith_filter && zenith > site.zenith_limit {
        site.zenith_limit
    } else {
        zenith
    }
}

/// `None` unless `x` lies in [-1, 1]; round-off past the bounds is not
/// absorbed.
fn checked_acos(x: f64) -> Option<f64> {
    if (-1.0..=1.0).contains(&x) {
        Some(x.acos())
    } else {
        None
    }
}
