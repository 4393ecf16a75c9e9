//! SVG charts of a finished series: one overlay chart with all three angles
//! on shared axes, and a stacked chart with one panel per angle.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;

use crate::config::format_timestamp;
use crate::error::Result;
use crate::export::persist;
use crate::types::{SeriesColumns, SiteConfiguration, SolarPositionSeries};

pub const OVERLAY_FILE: &str = "solar-incidentangle-1.svg";
pub const STACKED_FILE: &str = "solar-incidentangle-2.svg";

const WIDTH: f64 = 1200.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const TITLE_HEIGHT: f64 = 80.0;
const AXIS_HEIGHT: f64 = 50.0;
const X_TICKS: usize = 6;
const Y_TICKS: usize = 5;

const AZIMUTH_COLOR: &str = "blue";
const ZENITH_COLOR: &str = "green";
const INCIDENT_COLOR: &str = "red";

pub fn title_lines(site: &SiteConfiguration) -> [String; 3] {
    [
        format!(
            "Solar Incident Angle @ ({},{})",
            site.latitude, site.longitude
        ),
        format!(
            "Tilt (Horizontal): {} deg, Azimuth (South CC): {} deg @ Elevation: {} m",
            site.tilt, site.azimuth, site.elevation
        ),
        format!(
            "{} to {} @ {} min Interval",
            format_timestamp(&site.start),
            format_timestamp(&site.end),
            site.interval_minutes
        ),
    ]
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    t0: i64,
    t1: i64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn x(&self, t: &DateTime<Utc>) -> f64 {
        let span = (self.t1 - self.t0).max(1) as f64;
        self.left + (t.timestamp() - self.t0) as f64 / span * self.width
    }

    fn y(&self, v: f64) -> f64 {
        let span = self.y_max - self.y_min;
        self.top + self.height - (v - self.y_min) / span * self.height
    }
}

fn time_bounds(cols: &SeriesColumns, site: &SiteConfiguration) -> (i64, i64) {
    match (cols.timestamps.first(), cols.timestamps.last()) {
        (Some(first), Some(last)) => (first.timestamp(), last.timestamp()),
        _ => (site.start.timestamp(), site.end.timestamp()),
    }
}

/// Range covering every value, rounded outward to multiples of 10 degrees.
fn value_bounds<'a>(columns: impl IntoIterator<Item = &'a [f64]>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in columns.into_iter().flatten().filter(|v| v.is_finite()) {
        lo = lo.min(*v);
        hi = hi.max(*v);
    }
    if lo > hi {
        return (0.0, 180.0);
    }
    let lo = (lo / 10.0).floor() * 10.0;
    let hi = (hi / 10.0).ceil() * 10.0;
    if hi - lo < 10.0 {
        (lo, lo + 10.0)
    } else {
        (lo, hi)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_header<W: Write>(out: &mut W, height: f64, site: &SiteConfiguration) -> Result<()> {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif">"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    for (i, line) in title_lines(site).iter().enumerate() {
        writeln!(
            out,
            r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">{}</text>"#,
            WIDTH / 2.0,
            22.0 + 20.0 * i as f64,
            escape(line)
        )?;
    }
    Ok(())
}

fn write_axes<W: Write>(out: &mut W, frame: &Frame, x_labels: bool) -> Result<()> {
    writeln!(
        out,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
        frame.left, frame.top, frame.width, frame.height
    )?;
    let bottom = frame.top + frame.height;
    for i in 0..=Y_TICKS {
        let v = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / Y_TICKS as f64;
        let y = frame.y(v);
        writeln!(
            out,
            r##"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#dddddd"/>"##,
            frame.left,
            frame.left + frame.width
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end">{:.0}</text>"#,
            frame.left - 6.0,
            y + 4.0,
            v
        )?;
    }
    for i in 0..=X_TICKS {
        let t = frame.t0 + (frame.t1 - frame.t0) * i as i64 / X_TICKS as i64;
        let x = frame.left + frame.width * i as f64 / X_TICKS as f64;
        writeln!(
            out,
            r#"<line x1="{x:.2}" y1="{bottom:.2}" x2="{x:.2}" y2="{:.2}" stroke="black"/>"#,
            bottom + 5.0
        )?;
        if x_labels {
            let label = DateTime::<Utc>::from_timestamp(t, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            writeln!(
                out,
                r#"<text x="{x:.2}" y="{:.2}" font-size="11" text-anchor="middle">{label}</text>"#,
                bottom + 20.0
            )?;
        }
    }
    Ok(())
}

fn write_polyline<W: Write>(
    out: &mut W,
    frame: &Frame,
    timestamps: &[DateTime<Utc>],
    values: &[f64],
    color: &str,
) -> Result<()> {
    if timestamps.is_empty() {
        return Ok(());
    }
    write!(
        out,
        r#"<polyline fill="none" stroke="{color}" stroke-width="1" points=""#
    )?;
    for (t, v) in timestamps.iter().zip(values) {
        write!(out, "{:.2},{:.2} ", frame.x(t), frame.y(*v))?;
    }
    writeln!(out, r#""/>"#)?;
    Ok(())
}

fn write_y_label<W: Write>(out: &mut W, frame: &Frame, label: &str) -> Result<()> {
    let x = 18.0;
    let y = frame.top + frame.height / 2.0;
    writeln!(
        out,
        r#"<text x="{x}" y="{y:.2}" font-size="11" text-anchor="middle" transform="rotate(-90 {x} {y:.2})">{}</text>"#,
        escape(label)
    )?;
    Ok(())
}

/// Azimuth, zenith and incident angle against time on one set of axes.
pub fn render_overlay<W: Write>(
    series: &SolarPositionSeries,
    site: &SiteConfiguration,
    mut out: W,
) -> Result<()> {
    let cols = series.columns();
    let (t0, t1) = time_bounds(&cols, site);
    let (y_min, y_max) = value_bounds([
        cols.azimuth.as_slice(),
        cols.zenith.as_slice(),
        cols.incident_angle.as_slice(),
    ]);
    let height = 600.0;
    let frame = Frame {
        left: MARGIN_LEFT,
        top: TITLE_HEIGHT,
        width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
        height: height - TITLE_HEIGHT - AXIS_HEIGHT,
        t0,
        t1,
        y_min,
        y_max,
    };

    write_header(&mut out, height, site)?;
    write_axes(&mut out, &frame, true)?;
    write_polyline(&mut out, &frame, &cols.timestamps, &cols.azimuth, AZIMUTH_COLOR)?;
    write_polyline(&mut out, &frame, &cols.timestamps, &cols.zenith, ZENITH_COLOR)?;
    write_polyline(
        &mut out,
        &frame,
        &cols.timestamps,
        &cols.incident_angle,
        INCIDENT_COLOR,
    )?;
    write_y_label(&mut out, &frame, "Angle [deg]")?;
    writeln!(out, "</svg>")?;
    Ok(())
}

/// One panel per angle, stacked, sharing the time axis and value range.
pub fn render_stacked<W: Write>(
    series: &SolarPositionSeries,
    site: &SiteConfiguration,
    mut out: W,
) -> Result<()> {
    let cols = series.columns();
    let (t0, t1) = time_bounds(&cols, site);
    let (y_min, y_max) = value_bounds([
        cols.azimuth.as_slice(),
        cols.zenith.as_slice(),
        cols.incident_angle.as_slice(),
    ]);
    let panel_height = 220.0;
    let height = TITLE_HEIGHT + 3.0 * panel_height + AXIS_HEIGHT;

    write_header(&mut out, height, site)?;
    let panels = [
        (&cols.azimuth, AZIMUTH_COLOR, "Azimuth (North CW) [deg]"),
        (&cols.zenith, ZENITH_COLOR, "Zenith (Vertical) [deg]"),
        (&cols.incident_angle, INCIDENT_COLOR, "Incident Angle [deg]"),
    ];
    let last = panels.len() - 1;
    for (i, (values, color, label)) in panels.into_iter().enumerate() {
        let frame = Frame {
            left: MARGIN_LEFT,
            top: TITLE_HEIGHT + panel_height * i as f64,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: panel_height,
            t0,
            t1,
            y_min,
            y_max,
        };
        write_axes(&mut out, &frame, i == last)?;
        write_polyline(&mut out, &frame, &cols.timestamps, values, color)?;
        write_y_label(&mut out, &frame, label)?;
    }
    writeln!(out, "</svg>")?;
    Ok(())
}

/// Overlay and stacked documents, rendered in memory.
pub fn chart_documents(
    series: &SolarPositionSeries,
    site: &SiteConfiguration,
) -> Result<[Vec<u8>; 2]> {
    let mut overlay = Vec::new();
    render_overlay(series, site, &mut overlay)?;
    let mut stacked = Vec::new();
    render_stacked(series, site, &mut stacked)?;
    Ok([overlay, stacked])
}

/// Stores documents from [`chart_documents`] in `dir`, returning their paths.
pub fn write_charts(dir: impl AsRef<Path>, documents: &[Vec<u8>; 2]) -> Result<[PathBuf; 2]> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let paths = [dir.join(OVERLAY_FILE), dir.join(STACKED_FILE)];
    for (path, doc) in paths.iter().zip(documents) {
        persist(path, doc)?;
        debug!("wrote {}", path.display());
    }
    Ok(paths)
}

/// Renders both charts and writes them into `dir`.
pub fn render_charts(
    series: &SolarPositionSeries,
    site: &SiteConfiguration,
    dir: impl AsRef<Path>,
) -> Result<[PathBuf; 2]> {
    write_charts(dir, &chart_documents(series, site)?)
}
