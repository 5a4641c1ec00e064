mod error;
mod export;
mod loader;
mod resample;
mod sample;

pub use error::TrackError;
pub use export::to_csv;
pub use loader::{load_file, load_samples, LoadSettings, TIME_FORMAT};
pub use resample::{bucketize, resample, start_sample, truncate, Bucket};
pub use sample::Sample;
