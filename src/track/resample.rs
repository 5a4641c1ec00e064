use std::collections::BTreeMap;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use super::error::TrackError;
use super::sample::Sample;
use crate::config::ConfigError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
// Longest stretch of skipped local time on record is one day (Samoa, 2011).
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Samples sharing one truncated timestamp. Never empty.
#[derive(Debug, Clone)]
pub struct Bucket {
    pub key: DateTime<Tz>,
    pub members: Vec<Sample>,
}

impl Bucket {
    /// Field-wise arithmetic mean of the members, stamped with the bucket key.
    pub fn mean(&self) -> Sample {
        let (mut lat, mut lng, mut elevation) = (0.0, 0.0, 0.0);
        for sample in &self.members {
            lat += sample.latitude;
            lng += sample.longitude;
            elevation += sample.elevation;
        }

        let count = self.members.len() as f64;
        Sample {
            timestamp: self.key,
            latitude: lat / count,
            longitude: lng / count,
            elevation: elevation / count,
        }
    }
}

/// Floor `timestamp` to a multiple of `width` counted from the Unix epoch,
/// on the wall clock of the timestamp's own zone.
///
/// A floored wall-clock time that occurs twice (DST fall-back) resolves to
/// the occurrence with the timestamp's own offset. One that never occurs
/// (DST spring-forward) resolves to the first instant after the skipped
/// stretch.
pub fn truncate(timestamp: DateTime<Tz>, width: Duration) -> Result<DateTime<Tz>, TrackError> {
    let span = check_width(width)?;
    let out_of_range = || TrackError::Truncate {
        timestamp: timestamp.to_rfc3339(),
    };

    let floored = floor_naive(timestamp.naive_local(), span).ok_or_else(out_of_range)?;
    let tz = timestamp.timezone();

    match tz.from_local_datetime(&floored) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, latest) => {
            let own = timestamp.offset().fix();
            if latest.offset().fix() == own && earliest.offset().fix() != own {
                Ok(latest)
            } else {
                Ok(earliest)
            }
        }
        LocalResult::None => first_after_gap(tz, floored).ok_or_else(out_of_range),
    }
}

/// Group samples by truncated timestamp, ascending by key.
pub fn bucketize(samples: &[Sample], width: Duration) -> Result<Vec<Bucket>, TrackError> {
    check_width(width)?;

    let mut buckets: BTreeMap<DateTime<Tz>, Vec<Sample>> = BTreeMap::new();
    for sample in samples {
        let key = truncate(sample.timestamp, width)?;
        buckets.entry(key).or_default().push(sample.clone());
    }

    Ok(buckets
        .into_iter()
        .map(|(key, members)| Bucket { key, members })
        .collect())
}

/// Average `samples` over fixed `width` windows.
///
/// The output holds one sample per populated window, strictly ascending in
/// time. Input order does not matter.
pub fn resample(samples: &[Sample], width: Duration) -> Result<Vec<Sample>, TrackError> {
    let buckets = bucketize(samples, width)?;
    log::debug!(
        "Resampled {} samples into {} buckets of {}",
        samples.len(),
        buckets.len(),
        width
    );
    Ok(buckets.iter().map(Bucket::mean).collect())
}

/// Sample the map is centred on: the middle of the series.
pub fn start_sample(samples: &[Sample]) -> Option<&Sample> {
    samples.get(samples.len() / 2)
}

fn check_width(width: Duration) -> Result<i128, ConfigError> {
    match width.num_nanoseconds() {
        Some(nanos) if nanos > 0 => Ok(i128::from(nanos)),
        Some(_) => Err(ConfigError::NonPositiveBucketWidth(width.to_string())),
        None => Err(ConfigError::InvalidBucketWidth(format!(
            "{width} exceeds the supported range"
        ))),
    }
}

fn floor_naive(naive: NaiveDateTime, span: i128) -> Option<NaiveDateTime> {
    let utc = naive.and_utc();
    let stamp = i128::from(utc.timestamp()) * NANOS_PER_SECOND
        + i128::from(utc.timestamp_subsec_nanos());
    let floored = stamp - stamp.rem_euclid(span);

    let secs = i64::try_from(floored.div_euclid(NANOS_PER_SECOND)).ok()?;
    let nanos = u32::try_from(floored.rem_euclid(NANOS_PER_SECOND)).ok()?;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn first_after_gap(tz: Tz, skipped: NaiveDateTime) -> Option<DateTime<Tz>> {
    let minute = skipped.and_utc().timestamp().div_euclid(60) * 60;
    let mut candidate = DateTime::from_timestamp(minute, 0)?.naive_utc();
    for _ in 0..MAX_GAP_MINUTES {
        candidate += Duration::minutes(1);
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => return Some(dt),
            LocalResult::None => {}
        }
    }
    None
}
