//! Climatic Weather: city and Nigerian state weather lookup.
//!
//! Autocomplete over two static reference lists, geocoding and current
//! weather from OpenWeatherMap, and the presentation rules for the card.

pub mod config;
pub mod location;
pub mod report;
pub mod server;
pub mod weather;
