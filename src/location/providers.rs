//! Geocoding provider: OpenWeatherMap direct geocoding.

use serde::Deserialize;

use super::types::{GeocodedPlace, LookupError};
use crate::weather::OpenWeatherClient;

/// Resolves a free-text place name to its best match.
///
/// `Ok(None)` means the provider answered but knows no such place.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>, LookupError>;
}

#[derive(Deserialize, Debug)]
struct DirectGeocodeResult {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Parse a direct-geocoding body, keeping only the first (best) match.
pub fn parse_direct(body: &str) -> Result<Option<GeocodedPlace>, LookupError> {
    let results: Vec<DirectGeocodeResult> = serde_json::from_str(body)
        .map_err(|e| LookupError::Api(format!("malformed geocoding response: {}", e)))?;

    Ok(results.into_iter().next().map(|r| GeocodedPlace {
        latitude: r.lat,
        longitude: r.lon,
        name: r.name,
        state: r.state.filter(|s| !s.trim().is_empty()),
        country: r.country.filter(|c| !c.trim().is_empty()),
    }))
}

impl Geocoder for OpenWeatherClient {
    fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>, LookupError> {
        tracing::debug!(query, "geocoding");
        let body = self.get_body(&self.geocoding_url, &[("q", query), ("limit", "1")])?;
        parse_direct(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_first_match() {
        let body = r#"[
            {"name": "Lagos", "local_names": {"yo": "Èkó"}, "lat": 6.4550575, "lon": 3.3941795, "country": "NG", "state": "Lagos State"},
            {"name": "Lagos", "lat": 37.1028, "lon": -8.6730, "country": "PT", "state": "Faro"}
        ]"#;
        let place = parse_direct(body).unwrap().unwrap();
        assert_eq!(place.name, "Lagos");
        assert_relative_eq!(place.latitude, 6.4550575);
        assert_relative_eq!(place.longitude, 3.3941795);
        assert_eq!(place.country.as_deref(), Some("NG"));
        assert_eq!(place.state.as_deref(), Some("Lagos State"));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(parse_direct("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_missing_state() {
        let body = r#"[{"name": "Accra", "lat": 5.56, "lon": -0.2, "country": "GH"}]"#;
        let place = parse_direct(body).unwrap().unwrap();
        assert!(place.state.is_none());
    }

    #[test]
    fn test_blank_metadata_dropped() {
        let body = r#"[{"name": "X", "lat": 0, "lon": 0, "country": "", "state": " "}]"#;
        let place = parse_direct(body).unwrap().unwrap();
        assert!(place.state.is_none());
        assert!(place.country.is_none());
    }

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"cod": 401, "message": "Invalid API key."}"#;
        assert!(matches!(parse_direct(body), Err(LookupError::Api(_))));
    }
}
