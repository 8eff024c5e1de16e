//! Relay transport — fetches live pages through a public CORS relay.
//!
//! The relay returns the raw live-site markup in a `contents` field, so
//! this is the one path where deactivation happens client-side.

use super::http::HttpClient;
use super::{urlencode, Transport, TransportError, TransportMode};
use crate::config::MirrorConfig;
use crate::deactivate::Deactivator;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RelayReply {
    #[serde(default)]
    contents: Option<String>,
}

/// Transport for public deployments without a companion API.
pub struct RelayTransport {
    client: HttpClient,
    relay_base: String,
    deactivator: Deactivator,
    timeout_ms: u64,
}

impl RelayTransport {
    pub fn new(cfg: &MirrorConfig, client: HttpClient, deactivator: Deactivator) -> Self {
        Self {
            client,
            relay_base: cfg.relay_base.clone(),
            deactivator,
            timeout_ms: cfg.timeout_ms,
        }
    }
}

#[async_trait]
impl Transport for RelayTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Relay
    }

    async fn retrieve(&self, target_url: &str) -> Result<String, TransportError> {
        let endpoint = format!("{}{}", self.relay_base, urlencode(target_url));
        tracing::debug!("relay retrieve: {endpoint}");

        let resp = self.client.get(&endpoint, self.timeout_ms).await?;
        let reply: RelayReply = serde_json::from_str(&resp.body)?;

        match reply.contents {
            Some(raw) => Ok(self.deactivator.transform(&raw)),
            None => Err(TransportError::RelayNoContents),
        }
    }
}
