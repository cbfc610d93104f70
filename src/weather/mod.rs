//! Current-weather retrieval from OpenWeatherMap.

pub mod client;
pub mod types;

pub use client::{OpenWeatherClient, WeatherSource};
pub use types::{parse_current, WeatherReport};
