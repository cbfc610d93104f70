//! Configuration file at ~/.climatic/config.json.
//!
//! Precedence: built-in defaults < config file < OPENWEATHER_API_KEY < CLI flags.
//! Missing fields default, so a file holding only `api_key` is valid.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::location::ReferenceData;
use crate::report::SunClock;
use crate::weather::client::{DEFAULT_GEOCODING_URL, DEFAULT_WEATHER_URL};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("Invalid config file {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("Unknown timezone '{0}'. Use IANA format (e.g. Africa/Lagos).")]
    Timezone(String),
    #[error("Cannot load reference data: {0}")]
    Dataset(String),
    #[error("No API key. Set OPENWEATHER_API_KEY or add \"api_key\" to the config file.")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub geocoding_url: String,
    pub weather_url: String,
    pub timeout_secs: u64,
    /// IANA zone for sunrise/sunset; host local time when unset
    pub timezone: Option<String>,
    pub cities_path: Option<PathBuf>,
    pub nigeria_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            timeout_secs: 10,
            timezone: None,
            cities_path: None,
            nigeria_path: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location if present.
    ///
    /// An explicit path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::read_file(p),
            None => {
                let p = Self::default_path();
                if p.exists() {
                    Self::read_file(&p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".climatic")
            .join("config.json")
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = serde_json::from_str(&data).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Overlay the API key from the environment, if set and non-empty.
    pub fn with_env_key(mut self, value: Option<String>) -> Self {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        self
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn sun_clock(&self) -> Result<SunClock, ConfigError> {
        match &self.timezone {
            Some(name) => name
                .parse::<Tz>()
                .map(SunClock::Zone)
                .map_err(|_| ConfigError::Timezone(name.clone())),
            None => Ok(SunClock::Host),
        }
    }

    pub fn reference_data(&self) -> Result<ReferenceData, ConfigError> {
        ReferenceData::load(self.nigeria_path.as_deref(), self.cities_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(c.port, 3000);
        assert!(matches!(c.require_api_key(), Err(ConfigError::MissingApiKey)));
        assert_eq!(c.sun_clock().unwrap(), SunClock::Host);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key": "abc123", "timezone": "Africa/Lagos"}"#).unwrap();

        let c = Config::load(Some(&path)).unwrap();
        assert_eq!(c.require_api_key().unwrap(), "abc123");
        assert_eq!(c.sun_clock().unwrap(), SunClock::Zone(chrono_tz::Africa::Lagos));
        assert_eq!(c.timeout_secs, 10);
        assert_eq!(c.weather_url, DEFAULT_WEATHER_URL);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"port": "not a number"}"#).unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_key_overrides_file() {
        let c = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };
        assert_eq!(c.clone().with_env_key(Some(" from-env ".into())).api_key.as_deref(), Some("from-env"));
        assert_eq!(c.clone().with_env_key(Some("".into())).api_key.as_deref(), Some("from-file"));
        assert_eq!(c.with_env_key(None).api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let c = Config {
            api_key: Some("  ".into()),
            ..Config::default()
        };
        assert!(c.require_api_key().is_err());
    }

    #[test]
    fn test_bad_timezone() {
        let c = Config {
            timezone: Some("Mars/Olympus".into()),
            ..Config::default()
        };
        assert!(matches!(c.sun_clock(), Err(ConfigError::Timezone(_))));
    }

    #[test]
    fn test_reference_data_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ng.json");
        fs::write(&path, r#"[{"name": "Ota", "state": "Ogun", "country": "Nigeria"}]"#).unwrap();
        let c = Config {
            nigeria_path: Some(path),
            ..Config::default()
        };
        let data = c.reference_data().unwrap();
        assert_eq!(data.nigeria.len(), 1);
        assert!(data.global.len() > 1);
    }
}
