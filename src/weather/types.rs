//! Weather payload types: the provider's wire format and our flattened report.

use serde::{Deserialize, Serialize};

use crate::location::LookupError;

/// Current conditions at a resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
    pub condition_description: String,
    pub condition_icon: String,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction_degrees: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// Unix seconds
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Unix seconds
    #[serde(default)]
    pub sunset: Option<i64>,
}

// ─── OpenWeatherMap wire format ──────────────────────────────────

#[derive(Deserialize, Debug)]
pub(crate) struct OwmCurrent {
    #[serde(default)]
    name: String,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    sys: Option<OwmSys>,
}

#[derive(Deserialize, Debug)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize, Debug)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Deserialize, Debug)]
struct OwmWind {
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct OwmSys {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

/// Provider status envelope found on both success and error bodies.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct OwmStatus {
    #[serde(default)]
    pub cod: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

/// The `cod` field arrives as either a number or a string.
pub(crate) fn status_code(cod: &serde_json::Value) -> Option<u16> {
    match cod {
        serde_json::Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn message_text(message: Option<&serde_json::Value>) -> Option<String> {
    match message? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Describe a provider error body, falling back to the HTTP status.
pub(crate) fn describe_failure(http_status: u16, body: &str) -> String {
    let status: OwmStatus = serde_json::from_str(body).unwrap_or_default();
    match message_text(status.message.as_ref()) {
        Some(msg) => format!("{} (HTTP {})", msg, http_status),
        None => format!("HTTP {}", http_status),
    }
}

/// Parse a current-weather body into a report.
pub fn parse_current(body: &str) -> Result<WeatherReport, LookupError> {
    // Check the status envelope first: error bodies lack `main` and `weather`.
    let status: OwmStatus = serde_json::from_str(body)
        .map_err(|e| LookupError::Api(format!("malformed weather response: {}", e)))?;
    if let Some(code) = status.cod.as_ref().and_then(status_code) {
        if !(200..300).contains(&code) {
            let msg = message_text(status.message.as_ref()).unwrap_or_else(|| "request failed".into());
            return Err(LookupError::Api(format!("{} (status {})", msg, code)));
        }
    }

    let raw: OwmCurrent = serde_json::from_str(body)
        .map_err(|e| LookupError::Api(format!("malformed weather response: {}", e)))?;
    raw.into_report()
}

impl OwmCurrent {
    fn into_report(self) -> Result<WeatherReport, LookupError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::Api("weather response has no conditions".into()))?;
        let (wind_speed, wind_direction_degrees) = match self.wind {
            Some(w) => (w.speed, w.deg),
            None => (None, None),
        };
        let (country_code, sunrise, sunset) = match self.sys {
            Some(s) => (s.country, s.sunrise, s.sunset),
            None => (None, None, None),
        };

        Ok(WeatherReport {
            location_name: self.name,
            temperature_celsius: self.main.temp,
            humidity_percent: self.main.humidity,
            condition_description: condition.description,
            condition_icon: condition.icon,
            wind_speed,
            wind_direction_degrees,
            country_code,
            sunrise,
            sunset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LAGOS_BODY: &str = r#"{
        "coord": {"lon": 3.39, "lat": 6.45},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 30.2, "feels_like": 35.1, "humidity": 74},
        "wind": {"speed": 5, "deg": 90},
        "sys": {"country": "NG", "sunrise": 1700000000, "sunset": 1700043000},
        "name": "Lagos",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let r = parse_current(LAGOS_BODY).unwrap();
        assert_eq!(r.location_name, "Lagos");
        assert_relative_eq!(r.temperature_celsius, 30.2);
        assert_relative_eq!(r.humidity_percent, 74.0);
        assert_eq!(r.condition_description, "light rain");
        assert_eq!(r.condition_icon, "10d");
        assert_eq!(r.wind_speed, Some(5.0));
        assert_eq!(r.wind_direction_degrees, Some(90.0));
        assert_eq!(r.country_code.as_deref(), Some("NG"));
        assert_eq!(r.sunrise, Some(1_700_000_000));
        assert_eq!(r.sunset, Some(1_700_043_000));
    }

    #[test]
    fn test_parse_minimal_payload() {
        let body = r#"{
            "weather": [{"description": "haze", "icon": "50n"}],
            "main": {"temp": 12.5, "humidity": 40},
            "name": "Somewhere"
        }"#;
        let r = parse_current(body).unwrap();
        assert!(r.wind_speed.is_none());
        assert!(r.wind_direction_degrees.is_none());
        assert!(r.country_code.is_none());
        assert!(r.sunrise.is_none() && r.sunset.is_none());
    }

    #[test]
    fn test_wind_without_direction() {
        let body = r#"{
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "main": {"temp": 20, "humidity": 50},
            "wind": {"speed": 3.4},
            "name": "X",
            "cod": 200
        }"#;
        let r = parse_current(body).unwrap();
        assert_eq!(r.wind_speed, Some(3.4));
        assert!(r.wind_direction_degrees.is_none());
    }

    #[test]
    fn test_error_status_field() {
        let body = r#"{"cod": "404", "message": "city not found"}"#;
        assert_eq!(
            parse_current(body),
            Err(LookupError::Api("city not found (status 404)".into()))
        );
    }

    #[test]
    fn test_numeric_error_status_field() {
        let body = r#"{"cod": 401, "message": "Invalid API key."}"#;
        assert!(matches!(parse_current(body), Err(LookupError::Api(m)) if m.contains("401")));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(parse_current("<html>"), Err(LookupError::Api(_))));
        assert!(matches!(parse_current(r#"{"cod": 200}"#), Err(LookupError::Api(_))));
    }

    #[test]
    fn test_empty_conditions() {
        let body = r#"{"weather": [], "main": {"temp": 1, "humidity": 1}, "name": "X"}"#;
        assert_eq!(
            parse_current(body),
            Err(LookupError::Api("weather response has no conditions".into()))
        );
    }

    #[test]
    fn test_describe_failure() {
        assert_eq!(
            describe_failure(401, r#"{"cod": 401, "message": "Invalid API key."}"#),
            "Invalid API key. (HTTP 401)"
        );
        assert_eq!(describe_failure(502, "Bad Gateway"), "HTTP 502");
    }
}
