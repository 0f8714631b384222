use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// What the caller is asking about: a typed place name or a coordinate pair.
/// Exactly one form is active per request.
#[derive(Debug, Clone)]
pub enum LocationQuery {
    City(String),
    Coords(Coordinates),
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        LocationQuery::City(name.into())
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(name) => f.write_str(name),
            LocationQuery::Coords(coord) => write!(f, "{coord}"),
        }
    }
}

/// Normalized current-conditions data for one place.
///
/// Built fresh per request and discarded when superseded. `uv_index` is
/// `None` when the secondary lookup fails, `visibility_km` when the provider
/// omits the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    /// Coordinates echoed back by the provider. The UV lookup is keyed by
    /// these, not by whatever the caller originally asked for.
    pub coord: Coordinates,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub visibility_km: Option<f64>,
    pub condition: String,
    pub icon: String,
    pub uv_index: Option<f64>,
    pub observed_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Provider-hosted icon image for this report's condition.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }

    /// Visibility formatted to one decimal, `N/A` when the provider omitted it.
    pub fn visibility_display(&self) -> String {
        match self.visibility_km {
            Some(km) => format!("{km:.1}"),
            None => "N/A".to_string(),
        }
    }

    /// UV index formatted to one decimal, `N/A` when the lookup failed.
    pub fn uv_display(&self) -> String {
        match self.uv_index {
            Some(uv) => format!("{uv:.1}"),
            None => "N/A".to_string(),
        }
    }
}
