use thiserror::Error;

/// Failures of the primary current-conditions lookup.
///
/// Every variant carries the message shown to the user; the flow of the
/// request that produced it ends here, the next request starts clean.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Provider reported no match for the requested place name.
    #[error("city not found")]
    NotFound,

    /// Provider rejected the credential.
    #[error("invalid API key, check your configured credentials")]
    Unauthorized,

    /// Any other non-success status from the provider.
    #[error("weather data unavailable (status {status})")]
    Unavailable { status: u16 },

    /// The transport call itself could not complete.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered 2xx with a body we could not decode.
    #[error("malformed provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures of device-location resolution, mapped from the platform's own
/// failure codes. No network lookup is attempted once one of these fires.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    #[error("location access denied by user")]
    PermissionDenied,

    #[error("location information unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_messages() {
        assert_eq!(WeatherError::NotFound.to_string(), "city not found");
        assert_eq!(
            WeatherError::Unavailable { status: 503 }.to_string(),
            "weather data unavailable (status 503)"
        );
        assert!(WeatherError::Unauthorized.to_string().contains("API key"));
    }

    #[test]
    fn position_error_messages() {
        assert_eq!(
            PositionError::PermissionDenied.to_string(),
            "location access denied by user"
        );
        assert_eq!(
            PositionError::Timeout.to_string(),
            "location request timed out"
        );
    }
}
