//! OpenWeatherMap HTTP client.
//!
//! One blocking `ureq` agent serves both the geocoding and the current
//! weather endpoints. Calls are made one after the other, never in parallel.

use std::time::Duration;

use super::types::{describe_failure, parse_current, WeatherReport};
use crate::config::Config;
use crate::location::LookupError;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

const USER_AGENT: &str = concat!("ClimaticWeather/", env!("CARGO_PKG_VERSION"));

/// Source of current conditions for a coordinate pair.
pub trait WeatherSource {
    fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, LookupError>;
}

/// Client for the OpenWeatherMap geocoding and weather APIs.
pub struct OpenWeatherClient {
    agent: ureq::Agent,
    api_key: String,
    pub(crate) geocoding_url: String,
    weather_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_urls(api_key, DEFAULT_GEOCODING_URL, DEFAULT_WEATHER_URL, Duration::from_secs(10))
    }

    pub fn with_urls(
        api_key: impl Into<String>,
        geocoding_url: &str,
        weather_url: &str,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            api_key: api_key.into(),
            geocoding_url: geocoding_url.to_string(),
            weather_url: weather_url.to_string(),
        }
    }

    /// Build a client from configuration. Requires an API key.
    pub fn from_config(config: &Config) -> Result<Self, crate::config::ConfigError> {
        let key = config.require_api_key()?;
        Ok(Self::with_urls(
            key,
            &config.geocoding_url,
            &config.weather_url,
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Issue a GET and return the body of a successful response.
    pub(crate) fn get_body(&self, url: &str, params: &[(&str, &str)]) -> Result<String, LookupError> {
        let mut request = self.agent.get(url);
        for (k, v) in params {
            request = request.query(k, v);
        }
        request = request.query("appid", &self.api_key);

        match request.call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| LookupError::Api(format!("unreadable response: {}", e))),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                tracing::warn!(url, status = code, "provider returned an error status");
                Err(LookupError::Api(describe_failure(code, &body)))
            }
            Err(ureq::Error::Transport(t)) => {
                tracing::warn!(url, error = %t, "provider request failed");
                Err(LookupError::Api(format!("request failed: {}", t)))
            }
        }
    }
}

impl WeatherSource for OpenWeatherClient {
    fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, LookupError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        tracing::debug!(%lat, %lon, "fetching current weather");
        let body = self.get_body(
            &self.weather_url,
            &[("lat", lat.as_str()), ("lon", lon.as_str()), ("units", "metric")],
        )?;
        parse_current(&body)
    }
}
