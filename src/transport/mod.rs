//! Environment-aware retrieval strategies.
//!
//! A mirror deployment is either browsed off a loopback host (where the
//! companion API runs alongside it) or off a public static host (where
//! cross-origin rules force everything through a CORS relay). The mode is
//! resolved once at startup from the mirror host and both strategies fulfil
//! the same contract: return finished, embeddable markup or fail with a
//! [`TransportError`].

pub mod direct;
pub mod http;
pub mod relay;

use crate::config::MirrorConfig;
use crate::deactivate::Deactivator;
use async_trait::async_trait;
use self::http::HttpClient;
use std::net::IpAddr;
use thiserror::Error;

/// Which backend strategy `retrieve` uses. Resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Loopback deployment: companion API returns pre-transformed markup.
    Direct,
    /// Public deployment: CORS relay returns raw markup, transformed here.
    Relay,
}

impl TransportMode {
    /// Resolve the mode from the mirror host. Loopback hosts get Direct,
    /// everything else gets Relay. Pure and stable: same host, same mode.
    pub fn resolve(host: &str) -> Self {
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        let loopback = bare == "localhost"
            || bare
                .parse::<IpAddr>()
                .map(|ip| ip.is_loopback())
                .unwrap_or(false);
        if loopback {
            TransportMode::Direct
        } else {
            TransportMode::Relay
        }
    }

    /// Actionable hint appended to user-facing transport failures.
    pub fn hint(&self) -> &'static str {
        match self {
            TransportMode::Direct => "is the companion API running?",
            TransportMode::Relay => "relay may be down",
        }
    }

    /// Short label for logs and `doctor` output.
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Direct => "direct",
            TransportMode::Relay => "relay",
        }
    }
}

/// Failure of either backend strategy.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The companion API answered with `ok: false`.
    #[error("companion API error: {0}")]
    Companion(String),
    /// The relay answered without a `contents` field.
    #[error("relay returned no contents")]
    RelayNoContents,
    /// Network-level failure (timeout, connection refused, bad status).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Response body was not the JSON shape the backend promised.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Uniform retrieve contract fulfilled by both strategies.
///
/// `retrieve` takes an absolute URL on the live origin and returns finished
/// markup, safe to embed in the mirror. The direct strategy gets markup
/// pre-transformed by the companion API; the relay strategy transforms
/// client-side before returning. Either way the caller never has to care.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Which mode this transport implements.
    fn mode(&self) -> TransportMode;

    /// Fetch `target_url` from the live site and return embeddable markup.
    async fn retrieve(&self, target_url: &str) -> Result<String, TransportError>;
}

/// Build the transport for a resolved mode.
pub fn build(mode: TransportMode, cfg: &MirrorConfig, client: &HttpClient) -> Box<dyn Transport> {
    match mode {
        TransportMode::Direct => Box::new(direct::DirectTransport::new(cfg, client.clone())),
        TransportMode::Relay => Box::new(relay::RelayTransport::new(
            cfg,
            client.clone(),
            Deactivator::new(cfg),
        )),
    }
}

/// Live-origin URL for a full-text search of `query`.
pub fn resolve_search_endpoint(cfg: &MirrorConfig, query: &str) -> String {
    format!("{}/?s={}", cfg.live_origin, urlencode(query))
}

/// Live-origin URL for the page at a root-relative `path`.
pub fn resolve_page_endpoint(cfg: &MirrorConfig, path: &str) -> String {
    format!("{}{}", cfg.live_origin, path)
}

/// Percent-encode a string for use inside a query component.
pub fn urlencode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_hosts_resolve_direct() {
        assert_eq!(TransportMode::resolve("localhost"), TransportMode::Direct);
        assert_eq!(TransportMode::resolve("127.0.0.1"), TransportMode::Direct);
        assert_eq!(TransportMode::resolve("::1"), TransportMode::Direct);
        assert_eq!(TransportMode::resolve("[::1]"), TransportMode::Direct);
    }

    #[test]
    fn public_hosts_resolve_relay() {
        assert_eq!(
            TransportMode::resolve("example.github.io"),
            TransportMode::Relay
        );
        assert_eq!(TransportMode::resolve("192.168.1.10"), TransportMode::Relay);
        assert_eq!(TransportMode::resolve(""), TransportMode::Relay);
    }

    #[test]
    fn resolution_is_stable() {
        for _ in 0..3 {
            assert_eq!(TransportMode::resolve("localhost"), TransportMode::Direct);
            assert_eq!(TransportMode::resolve("mirror.net"), TransportMode::Relay);
        }
    }

    #[test]
    fn search_endpoint_percent_encodes_query() {
        let cfg = MirrorConfig {
            live_origin: "https://live.test".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_search_endpoint(&cfg, "水"),
            "https://live.test/?s=%E6%B0%B4"
        );
    }

    #[test]
    fn page_endpoint_appends_path() {
        let cfg = MirrorConfig {
            live_origin: "https://live.test".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_page_endpoint(&cfg, "/articles/42/"),
            "https://live.test/articles/42/"
        );
    }
}
