//! Two-stage page resolution: local-existence probe, then live fallback.
//!
//! Result links point into the mirror, but not every page has been
//! materialized there. Stage 1 asks the mirror with a HEAD probe; any
//! positive answer opens the local page and stops. Stage 2 substitutes the
//! mirror prefix back to the live origin and retrieves through the
//! transport. A transport failure here is fatal to the action — there is
//! no rendered surface to degrade into — so it surfaces as an alert.

use crate::config::MirrorConfig;
use crate::surface::Surface;
use crate::transport::{self, Transport};
use crate::transport::http::HttpClient;
use anyhow::Result;

pub struct PageResolver {
    cfg: MirrorConfig,
    client: HttpClient,
    transport: Box<dyn Transport>,
}

impl PageResolver {
    pub fn new(cfg: MirrorConfig, client: HttpClient, transport: Box<dyn Transport>) -> Self {
        Self {
            cfg,
            client,
            transport,
        }
    }

    /// Open a result link. `local_href` is a mirror-local path like
    /// `/snapshot/articles/42/`.
    pub async fn open(&self, local_href: &str, surface: &mut dyn Surface) -> Result<()> {
        if self.exists_locally(local_href).await {
            tracing::info!("{local_href} present in mirror, opening locally");
            surface.open_local(local_href);
            return Ok(());
        }

        // Not materialized in the mirror: fetch live. Not-found and
        // network error are treated the same, both mean "not here".
        let live_path = local_href.replacen(&self.cfg.mirror_prefix, "/", 1);
        let live_url = transport::resolve_page_endpoint(&self.cfg, &live_path);
        tracing::info!(
            "{local_href} absent locally, fetching {live_url} via {}",
            self.transport.mode().label()
        );

        match self.transport.retrieve(&live_url).await {
            Ok(markup) => surface.open_markup(local_href, &markup)?,
            Err(e) => {
                surface.alert(&format!("failed to fetch page: {e}"));
            }
        }
        Ok(())
    }

    /// Stage 1: lightweight existence probe, no body transfer.
    async fn exists_locally(&self, local_href: &str) -> bool {
        let probe_url = self.cfg.mirror_url(local_href);
        match self.client.head(&probe_url).await {
            Ok(status) => (200..400).contains(&status),
            Err(e) => {
                tracing::debug!("probe failed for {probe_url}: {e}");
                false
            }
        }
    }
}
