use chrono::DateTime;
use chrono_tz::Tz;

/// One GPS observation, either read from the track or averaged over a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Tz>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}
