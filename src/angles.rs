use chrono::{DateTime, Datelike, Timelike, Utc};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const J2000: f64 = 2451545.0;
const UNIX_EPOCH_JD: f64 = 2440587.5;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wraps an hour angle into [-180, 180).
pub fn normalize_hour_angle(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> i32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    (sum + day) as i32
}

pub fn julian_day(dt: &DateTime<Utc>) -> f64 {
    let secs = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
    secs / 86400.0 + UNIX_EPOCH_JD
}

pub fn days_since_j2000(dt: &DateTime<Utc>) -> f64 {
    julian_day(dt) - J2000
}

/// Greenwich mean sidereal time in degrees for `n` days since J2000.0.
pub fn greenwich_mean_sidereal_time(n: f64) -> f64 {
    normalize_angle(280.46061837 + 360.98564736629 * n)
}

pub fn utc_hours(dt: &DateTime<Utc>) -> f64 {
    dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0
}

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

pub fn equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn utc_lst_correction(longitude: f64, eot: f64) -> f64 {
    (4.0 * longitude + eot) / 60.0
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Sun azimuth measured from north, clockwise, in [0, 360).
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    let az_rad = sin_az.atan2(cos_az);
    normalize_angle(rad_to_deg(az_rad))
}

/// Absolute difference between the south-referenced sun azimuth and the
/// surface azimuth. Not wrapped, so it can exceed 180.
pub fn surface_solar_azimuth(sun_azimuth_north: f64, surface_azimuth: f64) -> f64 {
    let sun_azimuth_south = sun_azimuth_north - 180.0;
    (sun_azimuth_south - surface_azimuth).abs()
}

/// Cosine of the incident angle on a surface tilted `tilt` degrees from
/// horizontal, for a sun at `zenith` and surface-solar azimuth `gamma`.
pub fn incidence_cosine(zenith: f64, tilt: f64, gamma: f64) -> f64 {
    let beta = deg_to_rad(solar_altitude(zenith));
    let gamma = deg_to_rad(gamma);
    let eta = deg_to_rad(tilt);
    beta.cos() * gamma.cos() * eta.sin() + beta.sin() * eta.cos()
}

pub fn day_of_year_utc(dt: &DateTime<Utc>) -> i32 {
    day_of_year(dt.year(), dt.month(), dt.day())
}
