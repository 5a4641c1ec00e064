use chrono::Duration;
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::track::LoadSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown timezone: {0:?}")]
    UnknownTimezone(String),
    #[error("invalid bucket width: {0}")]
    InvalidBucketWidth(String),
    #[error("bucket width must be positive, got {0}")]
    NonPositiveBucketWidth(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_timezone")]
    pub source_timezone: String,
    #[serde(default = "default_bucket_width")]
    pub bucket_width: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            source_timezone: default_timezone(),
            bucket_width: default_bucket_width(),
            access_token: None,
            web: WebConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_bucket_width() -> String {
    "1m".to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub load: LoadSettings,
    pub bucket_width: Duration,
    pub access_token: Option<String>,
    pub bind: String,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let load = LoadSettings {
            source_timezone: parse_timezone(&self.source_timezone)?,
            timezone: parse_timezone(&self.timezone)?,
        };

        Ok(Settings {
            load,
            bucket_width: parse_bucket_width(&self.bucket_width)?,
            access_token: self.access_token.clone(),
            bind: self.web.bind.clone(),
        })
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

pub fn parse_bucket_width(s: &str) -> Result<Duration, ConfigError> {
    let std_duration = humantime::parse_duration(s.trim())
        .map_err(|e| ConfigError::InvalidBucketWidth(e.to_string()))?;
    if std_duration.is_zero() {
        return Err(ConfigError::NonPositiveBucketWidth(s.to_string()));
    }
    Duration::from_std(std_duration).map_err(|e| ConfigError::InvalidBucketWidth(e.to_string()))
}
