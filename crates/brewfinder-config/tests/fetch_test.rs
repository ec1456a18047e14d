#![allow(clippy::unwrap_used)]
// Integration tests for the bootstrap descriptor fetch using wiremock.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brewfinder_config::{BootstrapConfig, ConfigError};

#[tokio::test]
async fn test_fetch_yields_api_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "api_base": "https://api.brewfinder.test/brewery",
            "mapbox_token": "pk.test",
        })))
        .mount(&server)
        .await;

    let config = BootstrapConfig::fetch(&format!("{}/config.json", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        config.api_base.as_str(),
        "https://api.brewfinder.test/brewery"
    );
    assert_eq!(config.extra["mapbox_token"], "pk.test");
}

#[tokio::test]
async fn test_fetch_surfaces_http_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = BootstrapConfig::fetch(&format!("{}/config.json", server.uri())).await;
    assert!(matches!(result, Err(ConfigError::Http { status: 503 })));
}

#[tokio::test]
async fn test_fetch_rejects_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = BootstrapConfig::fetch(&format!("{}/config.json", server.uri())).await;
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
