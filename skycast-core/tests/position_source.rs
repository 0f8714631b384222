//! Integration tests for the IP-based position source against a mock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::{IpGeolocator, PositionError, PositionSource};

#[tokio::test]
async fn resolves_coordinates_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "country": "Ukraine",
            "city": "Kyiv",
            "lat": 50.45,
            "lon": 30.52,
            "query": "93.170.0.1"
        })))
        .mount(&server)
        .await;

    let source = IpGeolocator::new().with_base_url(server.uri());
    let coord = source.current_position().await.unwrap();

    assert!((coord.lat - 50.45).abs() < 1e-9);
    assert!((coord.lon - 30.52).abs() < 1e-9);
}

#[tokio::test]
async fn in_band_failure_is_position_unavailable() {
    let server = MockServer::start().await;

    // ip-api reports lookup failures with a 200 status and a "fail" payload.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "private range",
            "query": "10.0.0.1"
        })))
        .mount(&server)
        .await;

    let source = IpGeolocator::new().with_base_url(server.uri());
    let err = source.current_position().await.unwrap_err();

    assert!(matches!(err, PositionError::PositionUnavailable));
}

#[tokio::test]
async fn http_error_is_position_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = IpGeolocator::new().with_base_url(server.uri());
    let err = source.current_position().await.unwrap_err();

    assert!(matches!(err, PositionError::PositionUnavailable));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "lat": 0.0, "lon": 0.0 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let source = IpGeolocator::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(100));
    let err = source.current_position().await.unwrap_err();

    assert!(matches!(err, PositionError::Timeout));
}
