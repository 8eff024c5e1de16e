//! `kagami search <query>` — one-shot search against the live site.

use crate::cli::output;
use crate::config::MirrorConfig;
use crate::search::Searcher;
use crate::surface::ConsoleSurface;
use crate::transport::{self, http::HttpClient, TransportMode};
use anyhow::Result;

pub async fn run(query: &str) -> Result<()> {
    let cfg = MirrorConfig::load()?;
    let host = cfg.mirror_host().unwrap_or_default();
    let mode = TransportMode::resolve(&host);
    output::say(&format!("mode: {} (mirror host {host})", mode.label()));

    let client = HttpClient::new(cfg.timeout_ms);
    let transport = transport::build(mode, &cfg, &client);

    let mut searcher = Searcher::new(cfg, transport);
    let mut surface = ConsoleSurface::new(output::is_json());
    searcher.submit(query, &mut surface).await
}
