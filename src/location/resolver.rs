//! Query resolver — turns a confirmed query into a labelled weather result.
//!
//! Flow:  canonical search term → geocode → current weather → display label
//!
//! Typed queries have their label rebuilt from provider metadata, falling
//! back to the Nigeria reference list. Selected suggestions keep the label
//! the user clicked.

use super::dataset::{country_label, ReferenceData, NIGERIA_CODE, NIGERIA_NAME};
use super::providers::Geocoder;
use super::types::{GeocodedPlace, LookupError, LookupRequest, ResolvedWeather};
use crate::weather::{WeatherReport, WeatherSource};

/// The resolver with its reference data and external provider.
pub struct QueryResolver<P> {
    data: ReferenceData,
    provider: P,
}

impl<P: Geocoder + WeatherSource> QueryResolver<P> {
    pub fn new(data: ReferenceData, provider: P) -> Self {
        Self { data, provider }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    /// Resolve free text typed by the user.
    pub fn resolve_query(&self, query: &str) -> Result<ResolvedWeather, LookupError> {
        self.resolve(&LookupRequest::Typed(query.to_string()))
    }

    /// Resolve either entry path.
    pub fn resolve(&self, request: &LookupRequest) -> Result<ResolvedWeather, LookupError> {
        let (search, label_override) = match request {
            LookupRequest::Typed(text) => (self.canonical_query(text)?, None),
            LookupRequest::Selected(s) => {
                let search = s.search.trim();
                if search.is_empty() {
                    return Err(LookupError::EmptyQuery);
                }
                let display = s.display.trim();
                (search.to_string(), (!display.is_empty()).then(|| display.to_string()))
            }
        };

        // 1. Geocode
        let place = self
            .provider
            .geocode(&search)?
            .ok_or_else(|| LookupError::NotFound(search.clone()))?;

        // 2. Weather at the resolved coordinates
        let weather = self.provider.current(place.latitude, place.longitude)?;

        // 3. Label
        let display_label = match label_override {
            Some(label) => label,
            None => self.display_label(&place, &weather, &search),
        };

        tracing::info!(query = %search, label = %display_label, "resolved");

        Ok(ResolvedWeather {
            display_label,
            place,
            weather,
        })
    }

    /// The geocoding search term for typed text.
    ///
    /// "ikeja" → "ikeja, Nigeria"; "Rivers, NG" → "Rivers, Nigeria".
    /// Text with any other qualifier, or not in the Nigeria list, passes
    /// through trimmed.
    pub fn canonical_query(&self, text: &str) -> Result<String, LookupError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LookupError::EmptyQuery);
        }
        let mut parts = text.splitn(2, ',');
        let head = parts.next().unwrap_or(text).trim();
        let qualifier = parts.next().map(str::trim).filter(|q| !q.is_empty());
        if qualifier.is_some_and(|q| !is_nigeria(q)) {
            return Ok(text.to_string());
        }
        match self.data.nigeria_by_name_or_state(head) {
            Some(entry) => Ok(format!("{}, {}", head, entry.country)),
            None => Ok(text.to_string()),
        }
    }

    /// Rebuild a label from provider metadata and the Nigeria list.
    pub fn display_label(&self, place: &GeocodedPlace, weather: &WeatherReport, search: &str) -> String {
        let name = [place.name.trim(), weather.location_name.trim(), search]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(search)
            .to_string();

        let reported = place.country.clone().or_else(|| weather.country_code.clone());
        // The Nigeria list only fills gaps for places that are not known to be elsewhere.
        let local = match reported.as_deref() {
            Some(c) if !is_nigeria(c) => None,
            _ => self.data.nigeria_by_name(&name),
        };

        let state = place
            .state
            .clone()
            .or_else(|| local.and_then(|e| e.state.clone()));
        let country = reported.or_else(|| local.map(|e| e.country.clone()));

        let mut label = name;
        if let Some(state) = state {
            label.push_str(", ");
            label.push_str(&state);
        }
        if let Some(country) = country {
            label.push_str(", ");
            label.push_str(country_label(&country));
        }
        label
    }
}

fn is_nigeria(country: &str) -> bool {
    country.eq_ignore_ascii_case(NIGERIA_CODE) || country.eq_ignore_ascii_case(NIGERIA_NAME)
}
