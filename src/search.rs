//! Search orchestration: submission -> transport -> extraction -> render.
//!
//! A small state machine over the single result area:
//! Idle -> Loading -> {Results, Empty, Error}, restarting from Loading on
//! the next submission. Submitting an empty query is a no-op and never
//! reaches the transport.

use crate::config::MirrorConfig;
use crate::extract;
use crate::surface::{RenderState, Surface};
use crate::transport::{self, Transport};
use anyhow::Result;

/// The one mutable region results are rendered into. Created lazily on the
/// first submission, overwritten by every later one; two never coexist.
#[derive(Debug, Clone)]
pub struct ResultArea {
    pub state: RenderState,
}

/// Wires form submission to the transport, extractor, and surface.
pub struct Searcher {
    cfg: MirrorConfig,
    transport: Box<dyn Transport>,
    area: Option<ResultArea>,
}

impl Searcher {
    pub fn new(cfg: MirrorConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            cfg,
            transport,
            area: None,
        }
    }

    /// The result area, if a submission has created it.
    pub fn area(&self) -> Option<&ResultArea> {
        self.area.as_ref()
    }

    /// Result links wired by the last successful render.
    pub fn links(&self) -> &[extract::ResultLink] {
        match self.area.as_ref().map(|a| &a.state) {
            Some(RenderState::Results { links, .. }) => links,
            _ => &[],
        }
    }

    /// Submit a query. Empty queries change nothing.
    pub async fn submit(&mut self, query: &str, surface: &mut dyn Surface) -> Result<()> {
        if query.is_empty() {
            return Ok(());
        }

        self.render(
            RenderState::Loading {
                query: query.to_string(),
            },
            surface,
        );

        let search_url = transport::resolve_search_endpoint(&self.cfg, query);
        tracing::info!("searching \"{query}\" via {}", self.transport.mode().label());

        match self.transport.retrieve(&search_url).await {
            Ok(markup) => {
                let has_items = markup.contains(&self.cfg.result_item_class);
                let fragment = if has_items {
                    extract::extract_results(&markup, &self.cfg.result_container_class)
                } else {
                    None
                };
                match fragment {
                    Some(fragment) => {
                        let links =
                            extract::result_links(&fragment, &self.cfg.result_link_class);
                        tracing::debug!("{} result link(s) wired", links.len());
                        self.render(RenderState::Results { fragment, links }, surface);
                    }
                    None => self.render(
                        RenderState::Empty {
                            query: query.to_string(),
                        },
                        surface,
                    ),
                }
            }
            Err(e) => {
                let message =
                    format!("search failed: {e} ({})", self.transport.mode().hint());
                tracing::warn!("{message}");
                self.render(RenderState::Error { message }, surface);
            }
        }

        Ok(())
    }

    /// Overwrite the result area (creating it on first use) and display.
    fn render(&mut self, state: RenderState, surface: &mut dyn Surface) {
        surface.render(&state);
        match self.area.as_mut() {
            Some(area) => area.state = state,
            None => self.area = Some(ResultArea { state }),
        }
    }
}
