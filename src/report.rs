//! Presentation rules: temperature bands, condition and wind messages,
//! sunrise/sunset lines, and the weather card handed to the renderers.
//!
//! Everything here is a pure function of the weather report.

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

use crate::location::ResolvedWeather;
use crate::weather::WeatherReport;

const COLD_BELOW: f64 = 18.0;
const HOT_FROM: f64 = 28.0;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

// ─── Temperature ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Cold,
    Warm,
    Hot,
}

impl TemperatureBand {
    /// `< 18` cold, `[18, 28)` warm, `>= 28` hot. NaN lands in hot.
    pub fn classify(celsius: f64) -> Self {
        if celsius < COLD_BELOW {
            Self::Cold
        } else if celsius < HOT_FROM {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    /// Background tag used by the widget stylesheet.
    pub fn background(self) -> &'static str {
        match self {
            Self::Cold => "bg-cold",
            Self::Warm => "bg-warm",
            Self::Hot => "bg-hot",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Cold => "It's cold.",
            Self::Warm => "It's warm.",
            Self::Hot => "It's hot.",
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cold => write!(f, "cold"),
            Self::Warm => write!(f, "warm"),
            Self::Hot => write!(f, "hot"),
        }
    }
}

// ─── Conditions ──────────────────────────────────────────────────

/// Summary of a condition description. The first matching keyword wins.
pub fn condition_message(description: &str) -> String {
    let d = description.to_lowercase();
    let msg = if d.contains("rain") {
        "It's going to rain."
    } else if d.contains("sun") || d.contains("clear") {
        "It's sunny."
    } else if d.contains("cloud") {
        "It's cloudy."
    } else if d.contains("storm") {
        "There might be a storm."
    } else if d.contains("snow") {
        "It might snow."
    } else {
        return format!("Weather: {}", description);
    };
    msg.to_string()
}

// ─── Wind ────────────────────────────────────────────────────────

/// Eight-point compass direction for a bearing in degrees. Half-way
/// bearings round towards the next point clockwise, negative ones included.
pub fn compass_point(degrees: f64) -> &'static str {
    let idx = (degrees / 45.0 + 0.5).floor() as i64;
    COMPASS[idx.rem_euclid(8) as usize]
}

pub fn wind_message(speed: Option<f64>, degrees: Option<f64>) -> Option<String> {
    let speed = speed?;
    let mut msg = format!("Wind: {} m/s", speed);
    if let Some(deg) = degrees {
        msg.push_str(&format!(" ({})", compass_point(deg)));
    }
    Some(msg)
}

// ─── Sunrise / sunset ────────────────────────────────────────────

/// Time zone used to show sunrise and sunset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SunClock {
    /// The host's local zone.
    Host,
    Zone(Tz),
}

impl SunClock {
    /// `h:mm:ss AM/PM` for a Unix timestamp.
    pub fn format(&self, epoch_seconds: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp(epoch_seconds, 0)?;
        Some(match self {
            Self::Host => format_time(&utc.with_timezone(&Local)),
            Self::Zone(tz) => format_time(&utc.with_timezone(tz)),
        })
    }
}

fn format_time<Z: TimeZone>(t: &DateTime<Z>) -> String
where
    Z::Offset: fmt::Display,
{
    t.format("%-I:%M:%S %p").to_string()
}

/// Sunrise and sunset lines, only when both times are known.
pub fn sun_messages(sunrise: Option<i64>, sunset: Option<i64>, clock: &SunClock) -> Option<(String, String)> {
    let rise = clock.format(sunrise?)?;
    let set = clock.format(sunset?)?;
    Some((format!("Sunrise: {}", rise), format!("Sunset: {}", set)))
}

// ─── Weather card ────────────────────────────────────────────────

/// Everything the rendering layer needs for one result.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherCard {
    pub display_label: String,
    pub temperature_band: TemperatureBand,
    pub background: &'static str,
    pub temperature_line: String,
    pub temperature_message: &'static str,
    pub humidity_line: String,
    pub condition_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunrise_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunset_message: Option<String>,
    pub icon_url: String,
    pub weather: WeatherReport,
}

impl WeatherCard {
    pub fn build(resolved: &ResolvedWeather, clock: &SunClock) -> Self {
        let w = &resolved.weather;
        let band = TemperatureBand::classify(w.temperature_celsius);
        let (sunrise_message, sunset_message) = match sun_messages(w.sunrise, w.sunset, clock) {
            Some((rise, set)) => (Some(rise), Some(set)),
            None => (None, None),
        };

        Self {
            display_label: resolved.display_label.clone(),
            temperature_band: band,
            background: band.background(),
            temperature_line: format!("Temperature: {}°C", w.temperature_celsius),
            temperature_message: band.message(),
            humidity_line: format!("Humidity: {}%", w.humidity_percent),
            condition_message: condition_message(&w.condition_description),
            wind_message: wind_message(w.wind_speed, w.wind_direction_degrees),
            sunrise_message,
            sunset_message,
            icon_url: icon_url(&w.condition_icon),
            weather: w.clone(),
        }
    }

    /// Card body in display order.
    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![
            self.temperature_line.as_str(),
            self.temperature_message,
            self.humidity_line.as_str(),
            self.condition_message.as_str(),
        ];
        lines.extend(self.wind_message.as_deref());
        lines.extend(self.sunrise_message.as_deref());
        lines.extend(self.sunset_message.as_deref());
        lines
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon)
}

/// Boxed text rendering of a card for the terminal.
pub fn render_text_card(card: &WeatherCard) -> String {
    let lines = card.lines();
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(card.display_label.chars().count()))
        .max()
        .unwrap_or(0)
        + 2;

    let rule = "═".repeat(width);
    let mut out = String::new();
    out.push_str(&format!("  ╔{}╗\n", rule));
    out.push_str(&format!("  ║ {:<w$} ║\n", card.display_label, w = width - 2));
    out.push_str(&format!("  ╠{}╣\n", rule));
    for line in lines {
        out.push_str(&format!("  ║ {:<w$} ║\n", line, w = width - 2));
    }
    out.push_str(&format!("  ╚{}╝\n", rule));
    out
}
