//! Location subsystem for Climatic Weather.
//!
//! Reference datasets, autocomplete over them, geocoding, and resolution
//! of a confirmed query into a labelled weather result.

pub mod dataset;
pub mod providers;
pub mod resolver;
pub mod suggest;
pub mod types;

pub use dataset::{country_label, ReferenceData};
pub use providers::Geocoder;
pub use resolver::QueryResolver;
pub use suggest::{suggest, MAX_SUGGESTIONS};
pub use types::{GeocodedPlace, LocationEntry, LookupError, LookupRequest, ResolvedWeather, Suggestion};
