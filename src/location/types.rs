//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::weather::WeatherReport;

/// One row of a reference dataset.
///
/// Global entries carry no `state`; Nigeria entries always do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
}

impl LocationEntry {
    pub fn city(name: &str, country: &str) -> Self {
        Self {
            name: name.to_string(),
            state: None,
            country: country.to_string(),
        }
    }

    pub fn with_state(name: &str, state: &str, country: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Some(state.to_string()),
            country: country.to_string(),
        }
    }
}

/// An autocomplete candidate: what the user sees and what gets geocoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub display: String,
    pub search: String,
}

/// Best geocoding match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 code as returned by the provider (e.g. "NG")
    #[serde(default)]
    pub country: Option<String>,
}

/// A query confirmed by the user, either typed or picked from the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Typed(String),
    Selected(Suggestion),
}

/// A successful lookup: label, place and current conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedWeather {
    pub display_label: String,
    pub place: GeocodedPlace,
    pub weather: WeatherReport,
}

/// Lookup errors. Each one is shown to the user as a single message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Please enter a city name.")]
    EmptyQuery,
    #[error("City not found: '{0}'")]
    NotFound(String),
    #[error("Weather service error: {0}")]
    Api(String),
}
