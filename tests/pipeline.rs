use approx::assert_relative_eq;
use chrono::{Duration, Timelike};

use track_o_mat::config::{parse_timezone, Config, ConfigError};
use track_o_mat::render::MapRenderer;
use track_o_mat::track::{load_samples, resample, start_sample, LoadSettings, TrackError};

const TRACK: &str = "\
time,lat,lng,height
2021-03-14 10:00:10.000,10,34.0,100
2021-03-14 10:00:40.000,20,34.2,110
2021-03-14 10:01:05.000,30,34.4,120
";

fn settings() -> LoadSettings {
    LoadSettings {
        source_timezone: chrono_tz::UTC,
        timezone: chrono_tz::UTC,
    }
}

#[test]
fn three_samples_collapse_into_two_minutes() {
    let samples = load_samples(TRACK.as_bytes(), &settings()).unwrap();
    let out = resample(&samples, Duration::minutes(1)).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!((out[0].timestamp.hour(), out[0].timestamp.minute()), (10, 0));
    assert_eq!(out[0].timestamp.second(), 0);
    assert_relative_eq!(out[0].latitude, 15.0);
    assert_relative_eq!(out[0].longitude, 34.1, epsilon = 1e-9);
    assert_relative_eq!(out[0].elevation, 105.0);
    assert_eq!((out[1].timestamp.hour(), out[1].timestamp.minute()), (10, 1));
    assert_relative_eq!(out[1].latitude, 30.0);
}

#[test]
fn buckets_follow_the_display_timezone() {
    let settings = LoadSettings {
        source_timezone: chrono_tz::UTC,
        timezone: parse_timezone("Asia/Kolkata").unwrap(),
    };
    let samples = load_samples(TRACK.as_bytes(), &settings).unwrap();
    let out = resample(&samples, Duration::hours(1)).unwrap();

    // +05:30 puts all three samples inside the 15:00 local hour.
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].timestamp.hour(), 15);
    assert_eq!(out[0].timestamp.minute(), 0);
    assert_relative_eq!(out[0].latitude, 20.0);
}

#[test]
fn daily_buckets_span_a_dst_switch() {
    let jerusalem = parse_timezone("Asia/Jerusalem").unwrap();
    let settings = LoadSettings {
        source_timezone: jerusalem,
        timezone: jerusalem,
    };
    // Israel moved to +03:00 at 02:00 local on 2021-03-26.
    let track = "\
time,lat,lng,height
2021-03-26 01:00:00.000,10,35.0,100
2021-03-26 12:00:00.000,20,35.2,110
";
    let samples = load_samples(track.as_bytes(), &settings).unwrap();
    let width = Config {
        bucket_width: "1day".to_string(),
        ..Config::default()
    }
    .validate()
    .unwrap()
    .bucket_width;

    let out = resample(&samples, width).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].timestamp.to_rfc3339(), "2021-03-26T00:00:00+02:00");
    assert_relative_eq!(out[0].latitude, 15.0);
}

#[test]
fn zero_bucket_width_fails_the_run() {
    let samples = load_samples(TRACK.as_bytes(), &settings()).unwrap();
    let err = resample(&samples, Duration::zero()).unwrap_err();

    assert!(matches!(
        err,
        TrackError::Config(ConfigError::NonPositiveBucketWidth(_))
    ));
}

#[test]
fn unknown_timezone_in_config_fails_validation() {
    let config = Config::from_yaml("timezone: Foo/Bar\n").unwrap();

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::UnknownTimezone(_)));
    assert_eq!(err.to_string(), r#"unknown timezone: "Foo/Bar""#);
}

#[test]
fn bad_row_aborts_with_no_output() {
    let input = format!("{TRACK}not-a-date,1,2,3\n");

    let err = load_samples(input.as_bytes(), &settings()).unwrap_err();

    assert!(matches!(err, TrackError::Parse { row: 4, .. }));
    assert!(err.to_string().contains("row 4"));
}

#[test]
fn renders_the_resampled_track() {
    let samples = load_samples(TRACK.as_bytes(), &settings()).unwrap();
    let out = resample(&samples, Duration::minutes(1)).unwrap();
    let renderer = MapRenderer::new(Some("pk.secret".into())).unwrap();

    let mut html = Vec::new();
    renderer.render(&out, &mut html).unwrap();
    let html = String::from_utf8(html).unwrap();

    assert_eq!(start_sample(&out).map(|s| s.latitude), Some(30.0));
    assert!(html.contains("pk.secret"));
    assert!(html.contains("2 points"));
    assert!(html.contains("center: [34.4, 30]"));
}
