//! Runtime configuration for the mirror bridge.
//!
//! Loaded from `~/.kagami/config.json` when present, with `KAGAMI_*`
//! environment overrides on top. Every field has a serde default so a
//! partial config file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Deployment description of one mirror and its live counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Absolute origin of the live site, no trailing slash.
    pub live_origin: String,
    /// Root-relative path prefix under which the mirror snapshot lives.
    /// Carries both a leading and a trailing slash.
    pub mirror_prefix: String,
    /// Base URL the mirror is served from. Its host decides the transport
    /// mode and it is the target of page existence probes.
    pub mirror_base_url: String,
    /// Port the companion API listens on (Direct mode only).
    pub companion_port: u16,
    /// Relay endpoint base; the target URL is percent-encoded and appended.
    pub relay_base: String,
    /// Primary location of the key-map asset: an HTTP URL, a local file
    /// path, or a root-relative path resolved against the mirror base.
    pub keymap_path: String,
    /// Fixed fallback location for the key-map asset.
    pub keymap_fallback: String,
    /// File name of the live-only bundled script neutralized on deactivation.
    pub bundle_script: String,
    /// Local stylesheet file name whose cache-buster query is stripped.
    pub stylesheet: String,
    /// CSS class of the results container on the live site's template.
    pub result_container_class: String,
    /// CSS class of a single result item.
    pub result_item_class: String,
    /// CSS class of a result link anchor.
    pub result_link_class: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            live_origin: "https://www.example.org".to_string(),
            mirror_prefix: "/snapshot/".to_string(),
            mirror_base_url: "http://localhost:8000".to_string(),
            companion_port: 8081,
            relay_base: "https://api.allorigins.win/get?url=".to_string(),
            keymap_path: "/assets/data/key-map.json".to_string(),
            keymap_fallback: "/key-map.json".to_string(),
            bundle_script: "app.bundle.js".to_string(),
            stylesheet: "app.css".to_string(),
            result_container_class: "p-result".to_string(),
            result_item_class: "p-result__item".to_string(),
            result_link_class: "p-result__link".to_string(),
            timeout_ms: 15_000,
        }
    }
}

impl MirrorConfig {
    /// Path of the on-disk config file (`~/.kagami/config.json`).
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".kagami")
            .join("config.json")
    }

    /// Load the config file if it exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut cfg = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read config at {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("malformed config at {}", path.display()))?
        } else {
            Self::default()
        };
        cfg.apply_env();
        Ok(cfg)
    }

    /// Apply `KAGAMI_*` environment variable overrides in place.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("KAGAMI_LIVE_ORIGIN") {
            self.live_origin = v;
        }
        if let Ok(v) = std::env::var("KAGAMI_MIRROR_PREFIX") {
            self.mirror_prefix = v;
        }
        if let Ok(v) = std::env::var("KAGAMI_MIRROR_BASE") {
            self.mirror_base_url = v;
        }
        if let Ok(v) = std::env::var("KAGAMI_RELAY_BASE") {
            self.relay_base = v;
        }
        if let Ok(v) = std::env::var("KAGAMI_COMPANION_PORT") {
            if let Ok(port) = v.parse() {
                self.companion_port = port;
            }
        }
        if let Ok(v) = std::env::var("KAGAMI_TIMEOUT_MS") {
            if let Ok(ms) = v.parse() {
                self.timeout_ms = ms;
            }
        }
    }

    /// Host component of the mirror base URL, if it parses.
    pub fn mirror_host(&self) -> Option<String> {
        url::Url::parse(&self.mirror_base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }

    /// Origin of the companion API, derived from the mirror host and the
    /// configured companion port.
    pub fn companion_origin(&self) -> String {
        let host = self.mirror_host().unwrap_or_else(|| "localhost".to_string());
        format!("http://{}:{}", host, self.companion_port)
    }

    /// Resolve a root-relative path against the mirror base URL.
    pub fn mirror_url(&self, root_relative: &str) -> String {
        format!(
            "{}{}",
            self.mirror_base_url.trim_end_matches('/'),
            root_relative
        )
    }
}
