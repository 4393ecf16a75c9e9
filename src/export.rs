use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{SolarPositionRecord, SolarPositionSeries};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Timestamp_UTC")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "Zenith")]
    pub zenith: f64,
    #[serde(rename = "Azimuth")]
    pub azimuth: f64,
    #[serde(rename = "IncidentAngle")]
    pub incident_angle: f64,
}

impl From<&SolarPositionRecord> for CsvRow {
    fn from(r: &SolarPositionRecord) -> Self {
        Self {
            timestamp: r.timestamp,
            zenith: r.zenith,
            azimuth: r.azimuth,
            incident_angle: r.incident_angle,
        }
    }
}

/// Writes the header and one row per record.
pub fn write_csv<W: Write>(series: &SolarPositionSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if series.is_empty() {
        wtr.write_record(["Timestamp_UTC", "Zenith", "Azimuth", "IncidentAngle"])?;
    }
    for record in series {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn csv_bytes(series: &SolarPositionSeries) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(series, &mut buf)?;
    Ok(buf)
}

/// Renders the whole CSV in memory, then stores it with [`persist`].
pub fn write_csv_file(series: &SolarPositionSeries, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    persist(path, &csv_bytes(series)?)?;
    debug!("wrote {} rows to {}", series.len(), path.display());
    Ok(())
}

/// Writes `bytes` next to `path` and renames the result into place, so
/// `path` is either untouched or complete.
pub fn persist(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    let written = File::create(&partial).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| fs::rename(&partial, path)) {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<CsvRow>> {
    read_csv(File::open(path)?)
}
