//! Shared helpers for the integration tests.

use kagami::config::MirrorConfig;
use kagami::surface::{RenderState, Surface};

/// Surface that records every side effect instead of rendering anything.
#[derive(Default)]
pub struct RecordingSurface {
    pub renders: Vec<RenderState>,
    pub opened_local: Vec<String>,
    pub opened_markup: Vec<(String, String)>,
    pub alerts: Vec<String>,
}

impl Surface for RecordingSurface {
    fn render(&mut self, state: &RenderState) {
        self.renders.push(state.clone());
    }

    fn open_local(&mut self, href: &str) {
        self.opened_local.push(href.to_string());
    }

    fn open_markup(&mut self, href: &str, markup: &str) -> anyhow::Result<()> {
        self.opened_markup
            .push((href.to_string(), markup.to_string()));
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Config pointing mirror base (and thus companion origin) at a mock server.
pub fn mock_config(mock_uri: &str) -> MirrorConfig {
    let parsed = url::Url::parse(mock_uri).expect("mock uri");
    MirrorConfig {
        live_origin: "https://live.test".to_string(),
        mirror_prefix: "/snapshot/".to_string(),
        mirror_base_url: mock_uri.to_string(),
        companion_port: parsed.port().expect("mock port"),
        timeout_ms: 5_000,
        ..Default::default()
    }
}

/// A full live-site page with two results, in the live template's shape.
pub fn results_page() -> String {
    concat!(
        r#"<html><body><main><div class="l-page__body"><div class="l-container--middle">"#,
        r#"<div class="p-result">"#,
        r#"<div class="p-result__announce"><p>2 hits</p></div>"#,
        r#"<ul>"#,
        r#"<li class="p-result__item is-loaded"><a class="p-result__link" href="/snapshot/articles/42/">Alpha</a></li>"#,
        r#"<li class="p-result__item is-loaded"><a class="p-result__link" href="/snapshot/articles/43/">Beta</a></li>"#,
        r#"</ul></div></div></div></main></body></html>"#,
    )
    .to_string()
}
