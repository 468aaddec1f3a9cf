//! OpenWeather provider and fetcher against a mock HTTP server.

mod common;

use std::sync::Arc;

use serde_json::json;
use skydeck_core::{
    AppState, Applied, FetchError, Location, RetryPolicy, UnitSystem, WeatherError,
    WeatherProvider, WeatherService, fetch_json_with_retry,
    provider::openweather::OpenWeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{current_payload, forecast_payload};

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, 1)
}

fn provider(server: &MockServer, max_retries: u32) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY", &server.uri(), fast_retry(max_retries)).unwrap()
}

#[tokio::test]
async fn forecast_with_string_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = provider(&server, 3)
        .forecast(&Location::city("London"), UnitSystem::Metric)
        .await
        .unwrap();

    assert_eq!(forecast.daily.len(), 5);
    assert_eq!(forecast.hourly.len(), 24);
}

#[tokio::test]
async fn current_with_numeric_status_code_by_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;

    let current = provider(&server, 0)
        .current(&Location::coordinates(51.5, -0.12), UnitSystem::Imperial)
        .await
        .unwrap();

    assert_eq!(current.city, "London");
    assert_eq!(current.temperature.current, 8);
    assert_eq!(current.icon_code, "10d");
}

#[tokio::test]
async fn not_found_is_retried_then_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = provider(&server, 2)
        .current(&Location::city("Atlantis"), UnitSystem::Metric)
        .await
        .unwrap_err();

    match &err {
        WeatherError::Fetch(FetchError::Status { status, message }) => {
            assert_eq!(*status, 404);
            assert_eq!(message, "city not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Location not found. Please try another city.");
}

#[tokio::test]
async fn transient_failures_recover() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/data", server.uri())).unwrap();
    let value = fetch_json_with_retry(&reqwest::Client::new(), &url, &fast_retry(3)).await.unwrap();
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn non_json_error_body_gets_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/x", server.uri())).unwrap();
    let err =
        fetch_json_with_retry(&reqwest::Client::new(), &url, &fast_retry(0)).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error, status=502");
}

#[tokio::test]
async fn undecodable_success_body_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(2)
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&format!("{}/x", server.uri())).unwrap();
    let err =
        fetch_json_with_retry(&reqwest::Client::new(), &url, &fast_retry(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn payload_level_failure_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"cod": "401", "message": "Invalid API key"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, 3)
        .forecast(&Location::city("London"), UnitSystem::Metric)
        .await
        .unwrap_err();

    assert!(matches!(&err, WeatherError::Provider { code, .. } if code == "401"));
    assert!(err.user_message().starts_with("Invalid API key"));
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    let provider =
        OpenWeatherProvider::with_base_url("KEY", "http://127.0.0.1:1", fast_retry(1)).unwrap();

    let err = provider.current(&Location::city("London"), UnitSystem::Metric).await.unwrap_err();

    assert!(matches!(err, WeatherError::Fetch(FetchError::Network(_))));
    assert_eq!(err.user_message(), "Network error. Please check your internet connection.");
}

#[tokio::test]
async fn service_loads_both_endpoints_into_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let service = WeatherService::new(Arc::new(provider(&server, 0)));
    let cycle = service.load(&Location::city("London"), UnitSystem::Metric).await.unwrap();

    let (state, applied) = AppState::new(UnitSystem::Metric).apply(cycle);
    assert_eq!(applied, Applied::Updated);
    assert_eq!(state.current_city.as_deref(), Some("London"));

    let report = state.report.unwrap();
    assert_eq!(report.forecast.daily.len(), 5);
    assert_eq!(report.current.temperature.feels_like, 5);
}
