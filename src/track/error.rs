use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read track: {0}")]
    Read(#[source] std::io::Error),
    #[error("row {row}: {source}")]
    Decode {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: invalid timestamp {value:?}: {reason}")]
    Parse {
        row: usize,
        value: String,
        reason: String,
    },
    #[error("bucket start for {timestamp} is out of range")]
    Truncate { timestamp: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
