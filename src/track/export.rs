use serde::Serialize;

use super::sample::Sample;

#[derive(Serialize)]
struct Row {
    time: String,
    lat: f64,
    lng: f64,
    height: f64,
}

const HEADER: [&str; 4] = ["time", "lat", "lng", "height"];

/// Encode samples as a `time,lat,lng,height` CSV with RFC 3339 times.
///
/// The header is written even when there are no samples.
pub fn to_csv(samples: &[Sample]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for sample in samples {
        writer.serialize(Row {
            time: sample.timestamp.to_rfc3339(),
            lat: sample.latitude,
            lng: sample.longitude,
            height: sample.elevation,
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
