use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::WeatherError,
    model::{Coordinates, LocationQuery, WeatherReport},
};

use super::WeatherProvider;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint root. Used by tests to
    /// target a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_current(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let req = self
            .http
            .get(&url)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")]);

        let req = match query {
            LocationQuery::City(name) => req.query(&[("q", name.as_str())]),
            LocationQuery::Coords(coord) => req.query(&[
                ("lat", coord.lat.to_string().as_str()),
                ("lon", coord.lon.to_string().as_str()),
            ]),
        };

        let res = req.send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(
                "OpenWeather current request for {query} failed with status {status}: {}",
                truncate_body(&body)
            );
            return Err(status_error(
                status,
                matches!(query, LocationQuery::City(_)),
            ));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_report())
    }
}

/// Map a non-success status to the error surfaced to the caller.
///
/// 404 means "no such place" only for place-name lookups; a coordinate pair
/// is never "not found", so a 404 there degrades to `Unavailable`.
fn status_error(status: StatusCode, place_lookup: bool) -> WeatherError {
    match status.as_u16() {
        404 if place_lookup => WeatherError::NotFound,
        401 => WeatherError::Unauthorized,
        other => WeatherError::Unavailable { status: other },
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    sys: OwSys,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Meters; the provider omits it for some stations.
    visibility: Option<u32>,
}

impl OwCurrentResponse {
    fn into_report(self) -> WeatherReport {
        let observed_at = DateTime::from_timestamp(self.dt, 0).unwrap_or_else(Utc::now);

        let (condition, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        WeatherReport {
            city: self.name,
            country: self.sys.country.unwrap_or_default(),
            coord: Coordinates::new(self.coord.lat, self.coord.lon),
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            visibility_km: self.visibility.map(|m| f64::from(m) / 1000.0),
            condition,
            icon,
            uv_index: None,
            observed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwUvResponse {
    value: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        query: &LocationQuery,
    ) -> Result<WeatherReport, WeatherError> {
        info!("Fetching current weather for {query}");
        self.fetch_current(query).await
    }

    async fn uv_index(&self, coord: Coordinates) -> Result<f64, WeatherError> {
        let url = format!("{}/uvi", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coord.lat.to_string().as_str()),
                ("lon", coord.lon.to_string().as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(
                "OpenWeather UV request for {coord} failed with status {status}: {}",
                truncate_body(&body)
            );
            return Err(status_error(status, false));
        }

        let parsed: OwUvResponse = serde_json::from_str(&body)?;
        Ok(parsed.value)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
