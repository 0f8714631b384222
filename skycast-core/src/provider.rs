use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, LocationQuery, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the remote weather data provider.
///
/// The primary lookup and the UV lookup are separate calls because the UV
/// lookup is keyed by the coordinates echoed back by the primary response.
/// Error swallowing for the UV call is the client's job, not the provider's.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a place name or coordinate pair. The returned
    /// report has `uv_index` unset.
    async fn current_weather(
        &self,
        query: &LocationQuery,
    ) -> Result<WeatherReport, WeatherError>;

    /// Current UV index at the given coordinates.
    async fn uv_index(&self, coord: Coordinates) -> Result<f64, WeatherError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
