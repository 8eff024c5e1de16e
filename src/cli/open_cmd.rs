//! `kagami open <href>` — open a mirror-local page, falling back to live.

use crate::cli::output;
use crate::config::MirrorConfig;
use crate::resolver::PageResolver;
use crate::surface::ConsoleSurface;
use crate::transport::{self, http::HttpClient, TransportMode};
use anyhow::Result;

pub async fn run(href: &str) -> Result<()> {
    let cfg = MirrorConfig::load()?;
    let host = cfg.mirror_host().unwrap_or_default();
    let mode = TransportMode::resolve(&host);

    let client = HttpClient::new(cfg.timeout_ms);
    let transport = transport::build(mode, &cfg, &client);

    let resolver = PageResolver::new(cfg, client, transport);
    let mut surface = ConsoleSurface::new(output::is_json());
    resolver.open(href, &mut surface).await
}
