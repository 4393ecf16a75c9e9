use std::num::NonZeroU32;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunCoordinates {
    pub azimuth: f64,
    pub zenith: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub hour_angle: f64,
}

/// Site, surface orientation and run window. Angles are degrees; `azimuth` is
/// the surface azimuth measured from south, counter-clockwise positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConfiguration {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub tilt: f64,
    pub azimuth: f64,
    pub zenith_filter: bool,
    pub zenith_limit: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval_minutes: NonZeroU32,
}

impl SiteConfiguration {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start > self.end {
            return Err(ConfigError::StartAfterEnd {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Default for SiteConfiguration {
    fn default() -> Self {
        Self {
            latitude: 45.523097,
            longitude: -122.681325,
            elevation: 17.0,
            tilt: 45.0,
            azimuth: 0.0,
            zenith_filter: false,
            zenith_limit: 100.0,
            start: Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            end: Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            interval_minutes: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// One evaluated timestamp. `azimuth` is north-referenced as reported by the
/// provider; `zenith` is the value after the optional clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPositionRecord {
    pub timestamp: DateTime<Utc>,
    pub azimuth: f64,
    pub zenith: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub hour_angle: f64,
    pub incident_angle: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarPositionSeries {
    records: Vec<SolarPositionRecord>,
}

/// Column view of a series, filled in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesColumns {
    pub timestamps: Vec<DateTime<Utc>>,
    pub azimuth: Vec<f64>,
    pub zenith: Vec<f64>,
    pub incident_angle: Vec<f64>,
}

impl SolarPositionSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, record: SolarPositionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SolarPositionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolarPositionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&SolarPositionRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&SolarPositionRecord> {
        self.records.last()
    }

    pub fn columns(&self) -> SeriesColumns {
        let n = self.records.len();
        let mut cols = SeriesColumns {
            timestamps: Vec::with_capacity(n),
            azimuth: Vec::with_capacity(n),
            zenith: Vec::with_capacity(n),
            incident_angle: Vec::with_capacity(n),
        };
        for r in &self.records {
            cols.timestamps.push(r.timestamp);
            cols.azimuth.push(r.azimuth);
            cols.zenith.push(r.zenith);
            cols.incident_angle.push(r.incident_angle);
        }
        cols
    }

    pub fn daylight_count(&self) -> usize {
        self.records.iter().filter(|r| r.zenith < 90.0).count()
    }

    pub fn min_incident(&self) -> Option<&SolarPositionRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.incident_angle.total_cmp(&b.incident_angle))
    }
}

impl<'a> IntoIterator for &'a SolarPositionSeries {
    type Item = &'a SolarPositionRecord;
    type IntoIter = std::slice::Iter<'a, SolarPositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for SolarPositionSeries {
    type Item = SolarPositionRecord;
    type IntoIter = std::vec::IntoIter<SolarPositionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<SolarPositionRecord> for SolarPositionSeries {
    fn from_iter<I: IntoIterator<Item = SolarPositionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
