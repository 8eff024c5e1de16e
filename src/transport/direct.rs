//! Direct transport — rewrites live-site URLs onto the local companion API.
//!
//! The companion API fetches the live page server-side and returns markup
//! that is already deactivated, so this transport never runs the
//! client-side pipeline.

use super::http::HttpClient;
use super::{urlencode, Transport, TransportError, TransportMode};
use crate::config::MirrorConfig;
use async_trait::async_trait;
use serde::Deserialize;

/// Structured reply of both companion endpoints.
#[derive(Debug, Deserialize)]
struct CompanionReply {
    ok: bool,
    #[serde(default)]
    html: String,
    #[serde(default)]
    error: Option<String>,
    /// Advisory flag from the page endpoint; the extractor decides for itself.
    #[serde(default)]
    has_results: Option<bool>,
}

/// Transport for loopback deployments with a running companion API.
pub struct DirectTransport {
    client: HttpClient,
    companion_origin: String,
    live_origin: String,
    timeout_ms: u64,
}

impl DirectTransport {
    pub fn new(cfg: &MirrorConfig, client: HttpClient) -> Self {
        Self {
            client,
            companion_origin: cfg.companion_origin(),
            live_origin: cfg.live_origin.clone(),
            timeout_ms: cfg.timeout_ms,
        }
    }

    /// Rewrite a live-origin URL into the matching companion endpoint.
    ///
    /// Search URLs keep their already-encoded query verbatim; page URLs
    /// have their root-relative path percent-encoded into `?path=`.
    fn rewrite(&self, target_url: &str) -> String {
        if let Some((_, query)) = target_url.split_once("?s=") {
            format!("{}/api/search?s={}", self.companion_origin, query)
        } else {
            let path = target_url
                .strip_prefix(self.live_origin.as_str())
                .unwrap_or(target_url);
            format!("{}/api/page?path={}", self.companion_origin, urlencode(path))
        }
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Direct
    }

    async fn retrieve(&self, target_url: &str) -> Result<String, TransportError> {
        let endpoint = self.rewrite(target_url);
        tracing::debug!("direct retrieve: {endpoint}");

        let resp = self.client.get(&endpoint, self.timeout_ms).await?;
        let reply: CompanionReply = serde_json::from_str(&resp.body)?;

        if !reply.ok {
            let message = reply.error.unwrap_or_else(|| "companion error".to_string());
            return Err(TransportError::Companion(message));
        }
        if let Some(has_results) = reply.has_results {
            tracing::debug!("companion reports has_results={has_results}");
        }
        Ok(reply.html)
    }
}
