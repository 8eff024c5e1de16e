//! Two-key composition table (keypad) client.
//!
//! The mirror's search input is composed, not typed: picking an outer key
//! and an inner key looks up a composed unit (a CJK character on the
//! original deployment) in a two-level table shipped as a JSON asset.
//!
//! The table is a process-wide singleton with lifecycle
//! absent -> loading -> loaded-or-absent. A double load failure leaves it
//! absent and is only logged: composition degrading to a no-op is an
//! acceptable partial failure, raw text entry still works.

pub mod composer;

use crate::config::MirrorConfig;
use crate::transport::http::HttpClient;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Immutable two-level lookup: outer key -> inner key -> composed unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyMap(HashMap<String, HashMap<String, String>>);

impl KeyMap {
    /// Look up the composed unit for an (outer, inner) pair.
    pub fn lookup(&self, outer: &str, inner: &str) -> Option<&str> {
        self.0.get(outer)?.get(inner).map(String::as_str)
    }

    /// Outer keys, for listings.
    pub fn outer_keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Inner keys available under one outer key.
    pub fn inner_keys(&self, outer: &str) -> impl Iterator<Item = &str> {
        self.0
            .get(outer)
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }

    /// Number of outer keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of composable triples.
    pub fn triple_count(&self) -> usize {
        self.0.values().map(HashMap::len).sum()
    }
}

static TABLE: OnceLock<Option<KeyMap>> = OnceLock::new();

/// Load the process-wide table once; later calls return the first outcome.
///
/// One attempt against the configured primary location, exactly one retry
/// against the fixed fallback. Never an error to the caller.
pub async fn load(cfg: &MirrorConfig, client: &HttpClient) -> Option<&'static KeyMap> {
    if let Some(outcome) = TABLE.get() {
        return outcome.as_ref();
    }
    let loaded = load_table(cfg, client).await;
    // A concurrent loader may have won the race; either outcome is the
    // same table or None, so the first set wins and we read back.
    let _ = TABLE.set(loaded);
    TABLE.get().and_then(Option::as_ref)
}

/// The already-loaded table, if any. Never triggers a load.
pub fn table() -> Option<&'static KeyMap> {
    TABLE.get().and_then(Option::as_ref)
}

/// Non-global load: primary location, then the single documented fallback.
pub async fn load_table(cfg: &MirrorConfig, client: &HttpClient) -> Option<KeyMap> {
    match fetch_table(&cfg.keymap_path, cfg, client).await {
        Ok(map) => {
            tracing::info!(
                "key-map loaded from {}: {} outer keys",
                cfg.keymap_path,
                map.len()
            );
            Some(map)
        }
        Err(e) => {
            tracing::warn!("key-map load failed from {}: {e:#}", cfg.keymap_path);
            match fetch_table(&cfg.keymap_fallback, cfg, client).await {
                Ok(map) => {
                    tracing::info!("key-map loaded from fallback {}", cfg.keymap_fallback);
                    Some(map)
                }
                Err(e2) => {
                    tracing::error!("key-map fallback also failed: {e2:#}");
                    None
                }
            }
        }
    }
}

/// Fetch and parse the asset from one location.
///
/// A location is an HTTP URL, an existing local file path, or a
/// root-relative path resolved against the mirror base URL.
async fn fetch_table(location: &str, cfg: &MirrorConfig, client: &HttpClient) -> Result<KeyMap> {
    let raw = if location.starts_with("http://") || location.starts_with("https://") {
        let resp = client.get(location, cfg.timeout_ms).await?;
        anyhow::ensure!(resp.status < 400, "status {} from {location}", resp.status);
        resp.body
    } else if Path::new(location).is_file() {
        std::fs::read_to_string(location)
            .with_context(|| format!("cannot read key-map file {location}"))?
    } else {
        let url = cfg.mirror_url(location);
        let resp = client.get(&url, cfg.timeout_ms).await?;
        anyhow::ensure!(resp.status < 400, "status {} from {url}", resp.status);
        resp.body
    };
    serde_json::from_str(&raw).with_context(|| format!("malformed key-map at {location}"))
}
