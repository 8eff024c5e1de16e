//! Key-map asset loading: primary, single fallback, graceful absence.

mod common;

use common::mock_config;
use kagami::keypad;
use kagami::transport::http::HttpClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn primary_location_loads_the_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/data/key-map.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"氵":{"永":"泳"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    let table = keypad::load_table(&cfg, &client).await.unwrap();
    assert_eq!(table.lookup("氵", "永"), Some("泳"));
}

#[tokio::test]
async fn primary_failure_retries_fallback_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/data/key-map.json"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/key-map.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"木":{"木":"林"}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    let table = keypad::load_table(&cfg, &client).await.unwrap();
    assert_eq!(table.lookup("木", "木"), Some("林"));
}

#[tokio::test]
async fn double_failure_leaves_the_table_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    assert!(keypad::load_table(&cfg, &client).await.is_none());
}

#[tokio::test]
async fn corrupt_asset_counts_as_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/data/key-map.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/key-map.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    assert!(keypad::load_table(&cfg, &client).await.is_none());
}

#[tokio::test]
async fn local_file_path_is_a_valid_location() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("key-map.json");
    std::fs::write(&file, r#"{"氵":{"k":"水"}}"#).unwrap();

    let mut cfg = mock_config("http://127.0.0.1:1");
    cfg.keymap_path = file.to_string_lossy().into_owned();

    let client = HttpClient::new(cfg.timeout_ms);
    let table = keypad::load_table(&cfg, &client).await.unwrap();
    assert_eq!(table.lookup("氵", "k"), Some("水"));
}
