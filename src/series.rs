use std::iter::FusedIterator;
use std::num::NonZeroU32;

use chrono::{DateTime, TimeDelta, Utc};
use log::{info, trace};

use crate::error::Result;
use crate::incidence::IncidentAngleCalculator;
use crate::provider::{Almanac, SolarPositionProvider};
use crate::types::{SiteConfiguration, SolarPositionSeries};

/// Timestamps `start, start + interval, ...` up to and including `end`.
/// Iterating by reference restarts from `start` every time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeries {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_minutes: NonZeroU32,
}

pub fn generate(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval_minutes: NonZeroU32,
) -> TimeSeries {
    TimeSeries {
        start,
        end,
        interval_minutes,
    }
}

impl TimeSeries {
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn interval_minutes(&self) -> NonZeroU32 {
        self.interval_minutes
    }

    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        let span = (self.end - self.start).num_seconds();
        let step = i64::from(self.interval_minutes.get()) * 60;
        (span / step) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn iter(&self) -> Timestamps {
        Timestamps {
            start: self.start,
            interval_minutes: i64::from(self.interval_minutes.get()),
            front: 0,
            back: self.len(),
        }
    }
}

impl IntoIterator for TimeSeries {
    type Item = DateTime<Utc>;
    type IntoIter = Timestamps;

    fn into_iter(self) -> Timestamps {
        self.iter()
    }
}

impl IntoIterator for &TimeSeries {
    type Item = DateTime<Utc>;
    type IntoIter = Timestamps;

    fn into_iter(self) -> Timestamps {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Timestamps {
    start: DateTime<Utc>,
    interval_minutes: i64,
    front: usize,
    back: usize,
}

impl Timestamps {
    fn at(&self, index: usize) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_minutes(self.interval_minutes.checked_mul(index as i64)?)?;
        self.start.checked_add_signed(offset)
    }
}

impl Iterator for Timestamps {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        if self.front >= self.back {
            return None;
        }
        let t = self.at(self.front)?;
        self.front += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.saturating_sub(self.front);
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Timestamps {
    fn next_back(&mut self) -> Option<DateTime<Utc>> {
        if self.front >= self.back {
            return None;
        }
        let t = self.at(self.back - 1)?;
        self.back -= 1;
        Some(t)
    }
}

impl ExactSizeIterator for Timestamps {}

impl FusedIterator for Timestamps {}

#[derive(Debug, Clone, Default)]
pub struct SolarPositionSeriesBuilder<P> {
    calculator: IncidentAngleCalculator<P>,
}

impl<P: SolarPositionProvider> SolarPositionSeriesBuilder<P> {
    pub fn new(calculator: IncidentAngleCalculator<P>) -> Self {
        Self { calculator }
    }

    pub fn with_provider(provider: P) -> Self {
        Self::new(IncidentAngleCalculator::new(provider))
    }

    /// Evaluates every generated timestamp in order. The first failing
    /// record aborts the build and no partial series is returned.
    pub fn build(&self, site: &SiteConfiguration) -> Result<SolarPositionSeries> {
        site.validate()?;
        let timestamps = generate(site.start, site.end, site.interval_minutes);
        info!(
            "building series for ({}, {}) tilt {}° azimuth {}°: {} to {} every {} min, {} timestamps",
            site.latitude,
            site.longitude,
            site.tilt,
            site.azimuth,
            site.start,
            site.end,
            site.interval_minutes,
            timestamps.len()
        );

        let mut series = SolarPositionSeries::with_capacity(timestamps.len());
        for t in &timestamps {
            let record = self.calculator.compute(&t, site)?;
            trace!(
                "{} zenith={:.4} azimuth={:.4} incident={:.4}",
                record.timestamp,
                record.zenith,
                record.azimuth,
                record.incident_angle
            );
            series.push(record);
        }

        info!(
            "built {} records ({} with sun above horizon)",
            series.len(),
            series.daylight_count()
        );
        Ok(series)
    }
}

/// Builds a series with the default [`Almanac`] provider.
pub fn build(site: &SiteConfiguration) -> Result<SolarPositionSeries> {
    SolarPositionSeriesBuilder::with_provider(Almanac).build(site)
}
