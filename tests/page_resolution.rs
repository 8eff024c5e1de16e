//! Two-stage page resolution scenarios: probe, then live fallback.

mod common;

use common::{mock_config, RecordingSurface};
use kagami::resolver::PageResolver;
use kagami::transport::{self, http::HttpClient, TransportMode};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn present_page_opens_locally_without_any_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/snapshot/articles/42/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // Any GET would mean the fallback fired.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    let transport = transport::build(TransportMode::Direct, &cfg, &client);

    let resolver = PageResolver::new(cfg, client, transport);
    let mut surface = RecordingSurface::default();
    resolver
        .open("/snapshot/articles/42/", &mut surface)
        .await
        .unwrap();

    assert_eq!(surface.opened_local, vec!["/snapshot/articles/42/"]);
    assert!(surface.opened_markup.is_empty());
    assert!(surface.alerts.is_empty());
}

#[tokio::test]
async fn absent_page_falls_back_to_live_fetch_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/snapshot/articles/42/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    // The mirror prefix was substituted back to the live root before the
    // companion rewrite, so the page path has no /snapshot/.
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .and(query_param("path", "/articles/42/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "html": "<html><body><main>deactivated page</main></body></html>",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    let transport = transport::build(TransportMode::Direct, &cfg, &client);

    let resolver = PageResolver::new(cfg, client, transport);
    let mut surface = RecordingSurface::default();
    resolver
        .open("/snapshot/articles/42/", &mut surface)
        .await
        .unwrap();

    assert!(surface.opened_local.is_empty());
    assert_eq!(surface.opened_markup.len(), 1);
    let (href, markup) = &surface.opened_markup[0];
    assert_eq!(href, "/snapshot/articles/42/");
    assert!(markup.contains("deactivated page"));
}

#[tokio::test]
async fn fallback_failure_surfaces_a_blocking_alert() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": false,
            "html": "",
            "error": "upstream timed out",
        })))
        .mount(&server)
        .await;

    let cfg = mock_config(&server.uri());
    let client = HttpClient::new(cfg.timeout_ms);
    let transport = transport::build(TransportMode::Direct, &cfg, &client);

    let resolver = PageResolver::new(cfg, client, transport);
    let mut surface = RecordingSurface::default();
    resolver
        .open("/snapshot/articles/42/", &mut surface)
        .await
        .unwrap();

    assert!(surface.opened_markup.is_empty());
    assert_eq!(surface.alerts.len(), 1);
    assert!(surface.alerts[0].contains("upstream timed out"));
}
