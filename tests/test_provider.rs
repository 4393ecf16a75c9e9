use chrono::{DateTime, TimeZone, Utc};

use solar_incidence::provider::{Almanac, Model, Seasonal, SolarPositionProvider};
use solar_incidence::{ProviderError, SunCoordinates};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const LAT: f64 = 45.523097;
const LON: f64 = -122.681325;
const ELEV: f64 = 17.0;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

// ── Almanac: Portland solstices ──

#[test]
fn test_almanac_summer_morning_sun_up_in_the_east() {
    let sun = Almanac
        .sun_coordinates(utc(2017, 6, 21, 18, 0), LAT, LON, ELEV)
        .unwrap();
    assert_approx!(sun.zenith, 34.6, 2.0);
    assert!(sun.azimuth > 90.0 && sun.azimuth < 180.0, "azimuth={}", sun.azimuth);
    assert!(sun.hour_angle < 0.0, "hour_angle={}", sun.hour_angle);
}

#[test]
fn test_almanac_summer_declination_and_right_ascension() {
    let sun = Almanac
        .sun_coordinates(utc(2017, 6, 21, 18, 0), LAT, LON, ELEV)
        .unwrap();
    assert_approx!(sun.declination, 23.44, 0.1);
    assert_approx!(sun.right_ascension, 90.0, 1.5);
}

#[test]
fn test_almanac_winter_night_sun_below_horizon() {
    let sun = Almanac
        .sun_coordinates(utc(2017, 12, 21, 12, 0), LAT, LON, ELEV)
        .unwrap();
    assert!(sun.zenith > 90.0, "zenith={}", sun.zenith);
    assert_approx!(sun.declination, -23.44, 0.1);
    assert_approx!(sun.right_ascension, 270.0, 1.5);
}

#[test]
fn test_almanac_hour_angle_near_zero_at_solar_noon() {
    // Solar noon at -122.68° is about 20:12 UTC in late June.
    let sun = Almanac
        .sun_coordinates(utc(2017, 6, 21, 20, 12), LAT, LON, ELEV)
        .unwrap();
    assert_approx!(sun.hour_angle, 0.0, 1.5);
    assert_approx!(sun.azimuth, 180.0, 3.0);
    assert_approx!(sun.zenith, LAT - 23.44, 0.5);
}

#[test]
fn test_almanac_ranges_over_a_day() {
    for hour in 0..24 {
        let sun = Almanac
            .sun_coordinates(utc(2017, 3, 20, hour, 0), LAT, LON, ELEV)
            .unwrap();
        assert!((0.0..360.0).contains(&sun.azimuth), "azimuth={}", sun.azimuth);
        assert!((0.0..=180.0).contains(&sun.zenith), "zenith={}", sun.zenith);
        assert!((0.0..360.0).contains(&sun.right_ascension));
        assert!((-180.0..180.0).contains(&sun.hour_angle));
    }
}

#[test]
fn test_almanac_elevation_adds_small_parallax() {
    let t = utc(2017, 6, 21, 18, 0);
    let low = Almanac.sun_coordinates(t, LAT, LON, 0.0).unwrap();
    let high = Almanac.sun_coordinates(t, LAT, LON, 8000.0).unwrap();
    assert!(high.zenith > low.zenith);
    assert!(high.zenith - low.zenith < 1e-5);
    assert_eq!(high.azimuth, low.azimuth);
}

// ── Almanac: failures ──

#[test]
fn test_almanac_rejects_unsupported_year() {
    let err = Almanac
        .sun_coordinates(utc(1850, 1, 1, 0, 0), LAT, LON, ELEV)
        .unwrap_err();
    assert_eq!(
        err,
        ProviderError::UnsupportedDate {
            year: 1850,
            min: 1900,
            max: 2100
        }
    );
}

#[test]
fn test_almanac_rejects_invalid_coordinates() {
    let t = utc(2017, 6, 21, 18, 0);
    assert_eq!(
        Almanac.sun_coordinates(t, 95.0, LON, ELEV).unwrap_err(),
        ProviderError::InvalidLatitude(95.0)
    );
    assert_eq!(
        Almanac.sun_coordinates(t, LAT, 200.0, ELEV).unwrap_err(),
        ProviderError::InvalidLongitude(200.0)
    );
    assert_eq!(
        Almanac.sun_coordinates(t, LAT, LON, f64::NAN).unwrap_err(),
        ProviderError::NonFinite("elevation")
    );
}

// ── Seasonal ──

#[test]
fn test_seasonal_agrees_with_almanac_roughly() {
    for &(mo, d, h) in &[(3, 20, 20), (6, 21, 18), (9, 22, 22), (12, 21, 20)] {
        let t = utc(2017, mo, d, h, 0);
        let a = Almanac.sun_coordinates(t, LAT, LON, ELEV).unwrap();
        let s = Seasonal.sun_coordinates(t, LAT, LON, ELEV).unwrap();
        assert_approx!(a.zenith, s.zenith, 2.0);
        assert_approx!(a.declination, s.declination, 1.5);
    }
}

#[test]
fn test_seasonal_has_no_date_limit() {
    assert!(Seasonal
        .sun_coordinates(utc(1850, 6, 21, 12, 0), LAT, LON, ELEV)
        .is_ok());
}

#[test]
fn test_seasonal_rejects_invalid_latitude() {
    assert!(matches!(
        Seasonal.sun_coordinates(utc(2017, 6, 21, 12, 0), -91.0, LON, ELEV),
        Err(ProviderError::InvalidLatitude(_))
    ));
}

// ── Model selection ──

#[test]
fn test_model_parse_and_dispatch() {
    assert_eq!("almanac".parse::<Model>().unwrap(), Model::Almanac);
    assert_eq!("Seasonal".parse::<Model>().unwrap(), Model::Seasonal);
    assert!("spa".parse::<Model>().is_err());
    assert_eq!(Model::default(), Model::Almanac);

    let t = utc(2017, 6, 21, 18, 0);
    assert_eq!(
        Model::Seasonal.sun_coordinates(t, LAT, LON, ELEV),
        Seasonal.sun_coordinates(t, LAT, LON, ELEV)
    );
}

#[test]
fn test_closure_is_a_provider() {
    let fixed = |_: DateTime<Utc>, _: f64, _: f64, _: f64| {
        Ok::<_, ProviderError>(SunCoordinates {
            azimuth: 180.0,
            zenith: 30.0,
            right_ascension: 0.0,
            declination: 0.0,
            hour_angle: 0.0,
        })
    };
    let sun = fixed
        .sun_coordinates(utc(2017, 1, 1, 0, 0), LAT, LON, ELEV)
        .unwrap();
    assert_eq!(sun.zenith, 30.0);
}
