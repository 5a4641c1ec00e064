use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;

use super::error::TrackError;
use super::sample::Sample;

/// Wall-clock format of the `time` column, millisecond precision.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S.%3f";

/// Zones used while decoding a track.
#[derive(Debug, Clone, Copy)]
pub struct LoadSettings {
    /// Zone the naive `time` column is written in.
    pub source_timezone: Tz,
    /// Zone every loaded timestamp is displayed in.
    pub timezone: Tz,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            source_timezone: Tz::UTC,
            timezone: Tz::UTC,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    time: String,
    lat: f64,
    lng: f64,
    height: f64,
}

pub fn load_file(path: &Path, settings: &LoadSettings) -> Result<Vec<Sample>, TrackError> {
    let file = File::open(path).map_err(|source| TrackError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loading track from {}", path.display());
    load_samples(file, settings)
}

/// Decode a `time,lat,lng,height` CSV into samples, keeping row order.
///
/// The first failing row aborts the load; nothing is returned for the rows
/// decoded before it.
pub fn load_samples<R: Read>(
    reader: R,
    settings: &LoadSettings,
) -> Result<Vec<Sample>, TrackError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (idx, result) in reader.deserialize::<Row>().enumerate() {
        let row_number = idx + 1;
        let row = result.map_err(|source| decode_error(row_number, source))?;
        let timestamp =
            parse_timestamp(&row.time, settings).map_err(|reason| TrackError::Parse {
                row: row_number,
                value: row.time.clone(),
                reason,
            })?;

        samples.push(Sample {
            timestamp,
            latitude: row.lat,
            longitude: row.lng,
            elevation: row.height,
        });
    }

    log::debug!("Decoded {} samples", samples.len());
    Ok(samples)
}

fn decode_error(row: usize, source: csv::Error) -> TrackError {
    if source.is_io_error() {
        return TrackError::Read(source.into());
    }
    TrackError::Decode { row, source }
}

fn parse_timestamp(value: &str, settings: &LoadSettings) -> Result<chrono::DateTime<Tz>, String> {
    let naive = NaiveDateTime::parse_from_str(value, TIME_FORMAT).map_err(|e| e.to_string())?;

    let local = match settings.source_timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(format!(
                "local time does not exist in {}",
                settings.source_timezone.name()
            ))
        }
    };

    Ok(local.with_timezone(&settings.timezone))
}
