use chrono::{TimeZone, Utc};

use solar_incidence::config::{format_timestamp, parse_timestamp};
use solar_incidence::{ConfigError, Error, RunConfig, SiteConfiguration};

// ── Defaults ──

#[test]
fn test_default_config_matches_default_site() {
    let site = RunConfig::default().to_site().unwrap();
    assert_eq!(site, SiteConfiguration::default());
}

#[test]
fn test_default_site_values() {
    let s = SiteConfiguration::default();
    assert_eq!(s.latitude, 45.523097);
    assert_eq!(s.longitude, -122.681325);
    assert_eq!(s.elevation, 17.0);
    assert_eq!(s.tilt, 45.0);
    assert_eq!(s.azimuth, 0.0);
    assert!(!s.zenith_filter);
    assert_eq!(s.zenith_limit, 100.0);
    assert_eq!(s.start, Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(s.end, Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(s.interval_minutes.get(), 10);
}

// ── JSON ──

#[test]
fn test_from_json_full() {
    let json = r#"{
        "latitude": -33.9,
        "longitude": 151.2,
        "elevation": 58.0,
        "tilt": 30.0,
        "azimuth": 180.0,
        "zenith_filter": true,
        "zenith_limit": 85.0,
        "start": "2020-03-01T06:00",
        "end": "2020-03-01T18:30",
        "interval_minutes": 15
    }"#;
    let site = RunConfig::from_json(json).unwrap().to_site().unwrap();
    assert_eq!(site.latitude, -33.9);
    assert_eq!(site.longitude, 151.2);
    assert_eq!(site.azimuth, 180.0);
    assert!(site.zenith_filter);
    assert_eq!(site.zenith_limit, 85.0);
    assert_eq!(site.start, Utc.with_ymd_and_hms(2020, 3, 1, 6, 0, 0).unwrap());
    assert_eq!(site.end, Utc.with_ymd_and_hms(2020, 3, 1, 18, 30, 0).unwrap());
    assert_eq!(site.interval_minutes.get(), 15);
}

#[test]
fn test_from_json_partial_uses_defaults() {
    let config = RunConfig::from_json(r#"{ "tilt": 10.0, "interval_minutes": 60 }"#).unwrap();
    assert_eq!(config.tilt, 10.0);
    assert_eq!(config.interval_minutes, 60);
    assert_eq!(config.latitude, RunConfig::default().latitude);
    assert_eq!(config.start, RunConfig::default().start);
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(matches!(
        RunConfig::from_json("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        RunConfig::from_json(r#"{ "tilt": "steep" }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_json_roundtrip_through_serde() {
    let config = RunConfig {
        zenith_filter: true,
        interval_minutes: 5,
        ..RunConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(RunConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = RunConfig::load("/nonexistent/solar-incidence/run.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ── Validation ──

#[test]
fn test_start_after_end_is_rejected() {
    let config = RunConfig {
        start: "2018-01-01T00:00".into(),
        end: "2017-01-01T00:00".into(),
        ..RunConfig::default()
    };
    assert!(matches!(
        config.to_site(),
        Err(ConfigError::StartAfterEnd { .. })
    ));
}

#[test]
fn test_non_positive_interval_is_rejected() {
    for bad in [0, -10] {
        let config = RunConfig {
            interval_minutes: bad,
            ..RunConfig::default()
        };
        match config.to_site() {
            Err(ConfigError::NonPositiveInterval(v)) => assert_eq!(v, bad),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[test]
fn test_malformed_timestamp_names_field() {
    let config = RunConfig {
        end: "2017-13-01T00:00".into(),
        ..RunConfig::default()
    };
    match config.to_site() {
        Err(ConfigError::MalformedTimestamp { field, value, .. }) => {
            assert_eq!(field, "end");
            assert_eq!(value, "2017-13-01T00:00");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_start_equal_to_end_is_valid() {
    let config = RunConfig {
        start: "2017-06-21T18:00".into(),
        end: "2017-06-21T18:00".into(),
        ..RunConfig::default()
    };
    assert!(config.to_site().is_ok());
}

// ── Timestamps ──

#[test]
fn test_parse_timestamp_minute_precision() {
    let t = parse_timestamp("start", "2017-06-21T18:05").unwrap();
    assert_eq!(t, Utc.with_ymd_and_hms(2017, 6, 21, 18, 5, 0).unwrap());
    assert_eq!(format_timestamp(&t), "2017-06-21T18:05");
}

#[test]
fn test_parse_timestamp_rejects_other_layouts() {
    assert!(parse_timestamp("start", "2017-06-21 18:05").is_err());
    assert!(parse_timestamp("start", "2017-06-21").is_err());
    assert!(parse_timestamp("start", "").is_err());
}
