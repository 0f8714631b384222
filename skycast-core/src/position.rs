use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{info, warn};

use crate::{error::PositionError, model::Coordinates};

const IP_API_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of the device's current position.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, PositionError>;
}

/// Approximates device location from the machine's public IP address,
/// the closest a terminal gets to browser geolocation. No credential needed.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    base_url: String,
    timeout: Duration,
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self {
            base_url: IP_API_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Point the lookup at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl PositionSource for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        info!("Resolving current position from public IP");

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                warn!("Failed to build HTTP client for IP lookup: {err}");
                PositionError::PositionUnavailable
            })?;

        let res = http.get(&self.base_url).send().await.map_err(|err| {
            if err.is_timeout() {
                PositionError::Timeout
            } else {
                warn!("IP location request failed: {err}");
                PositionError::PositionUnavailable
            }
        })?;

        if !res.status().is_success() {
            warn!("IP location service returned status {}", res.status());
            return Err(PositionError::PositionUnavailable);
        }

        let parsed: IpApiResponse = res.json().await.map_err(|err| {
            warn!("IP location response could not be decoded: {err}");
            PositionError::PositionUnavailable
        })?;

        // ip-api reports errors in-band with a 200 status.
        if parsed.status != "success" {
            return Err(PositionError::PositionUnavailable);
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(PositionError::PositionUnavailable),
        }
    }
}

/// Stand-in for platforms or builds without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl PositionSource for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Err(PositionError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_geolocation_is_unsupported() {
        let err = NoGeolocation.current_position().await.unwrap_err();
        assert!(matches!(err, PositionError::Unsupported));
    }

    #[test]
    fn ip_api_error_payload_parses() {
        let parsed: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"private range","query":"10.0.0.1"}"#)
                .expect("valid payload");
        assert_eq!(parsed.status, "fail");
        assert_eq!(parsed.lat, None);
    }
}
