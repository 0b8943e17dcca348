//! Integration tests for the geocoder and forecast client using wiremock.
//!
//! These tests verify the HTTP behavior of the core against a mock
//! server: query composition, status handling and payload parsing.

use pogoda_core::{
    Coordinates, CurrentField, ForecastClient, ForecastSnapshot, Geocoder, NominatimGeocoder,
    WeatherError,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn moscow_geocode_fixture() -> serde_json::Value {
    serde_json::json!([
        { "lat": "55.75", "lon": "37.62", "display_name": "Москва, Россия" }
    ])
}

fn forecast_fixture() -> serde_json::Value {
    serde_json::json!({
        "latitude": 55.75,
        "longitude": 37.62,
        "current": {
            "time": "2024-11-25T14:00",
            "temperature_2m": 5.4,
            "weather_code": 3
        },
        "daily": {
            "time": ["2024-11-25", "2024-11-26", "2024-11-27", "2024-11-28"],
            "temperature_2m_min": [-1.2, -3.4, 0.6, 2.1],
            "temperature_2m_max": [5.4, 1.2, 4.8, 6.5],
            "weather_code": [3, 71, 61, 0]
        }
    })
}

#[tokio::test]
async fn geocode_resolves_known_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Москва"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(moscow_geocode_fixture()))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::with_base_url(format!("{}/search", mock_server.uri()))
        .expect("geocoder must build");

    let coords = geocoder.resolve("Москва").await.unwrap();
    assert_eq!(coords.latitude, 55.75);
    assert_eq!(coords.longitude, 37.62);
}

#[tokio::test]
async fn geocode_no_match_is_city_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let geocoder =
        NominatimGeocoder::with_base_url(format!("{}/search", mock_server.uri())).unwrap();

    let err = geocoder.resolve("Нигденебург").await.unwrap_err();
    assert!(matches!(err, WeatherError::CityNotFound));
    assert_eq!(err.to_string(), "Такого города не найдено!");
}

#[tokio::test]
async fn geocode_server_failure_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let geocoder =
        NominatimGeocoder::with_base_url(format!("{}/search", mock_server.uri())).unwrap();

    let err = geocoder.resolve("Москва").await.unwrap_err();
    assert!(matches!(err, WeatherError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn fetch_sends_the_fixed_and_selected_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "55.75"))
        .and(query_param("longitude", "37.62"))
        .and(query_param("timezone", "auto"))
        .and(query_param("forecast_days", "4"))
        .and(query_param("wind_speed_unit", "ms"))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min",
        ))
        .and(query_param("current", "temperature_2m,weather_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_fixture()))
        .mount(&mock_server)
        .await;

    let mut client = ForecastClient::with_base_url(
        Coordinates {
            latitude: 55.75,
            longitude: 37.62,
        },
        format!("{}/v1/forecast", mock_server.uri()),
    )
    .unwrap();
    client.set_current_fields(&[CurrentField::Temperature, CurrentField::WeatherCode]);

    let raw = client.fetch().await.unwrap();
    assert_eq!(raw.latitude, Some(55.75));
}

#[tokio::test]
async fn fetch_non_success_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = ForecastClient::with_base_url(
        Coordinates {
            latitude: 55.75,
            longitude: 37.62,
        },
        format!("{}/v1/forecast", mock_server.uri()),
    )
    .unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, WeatherError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn fetch_malformed_body_is_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = ForecastClient::with_base_url(
        Coordinates {
            latitude: 55.75,
            longitude: 37.62,
        },
        format!("{}/v1/forecast", mock_server.uri()),
    )
    .unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, WeatherError::NoData(_)));
}

#[tokio::test]
async fn moscow_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Москва"))
        .respond_with(ResponseTemplate::new(200).set_body_json(moscow_geocode_fixture()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_fixture()))
        .mount(&mock_server)
        .await;

    let geocoder =
        NominatimGeocoder::with_base_url(format!("{}/search", mock_server.uri())).unwrap();
    let coords = geocoder.resolve("Москва").await.unwrap();

    let mut client =
        ForecastClient::with_base_url(coords, format!("{}/v1/forecast", mock_server.uri()))
            .unwrap();
    client.set_current_fields(&[CurrentField::Temperature, CurrentField::WeatherCode]);

    let snapshot = ForecastSnapshot::new(client.fetch().await.unwrap());

    assert_eq!(snapshot.temperature().unwrap(), "5°C");
    assert_eq!(snapshot.description().unwrap(), "Облачно");
    assert_eq!(
        snapshot.current_timestamp().unwrap(),
        ("25 Ноя".to_string(), "14:00".to_string())
    );
    assert_eq!(snapshot.forecast().unwrap().len(), 3);
}
