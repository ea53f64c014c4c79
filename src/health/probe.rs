// src/health/probe.rs
// =============================================================================
// This module answers one question per link: can it be reached at all?
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - ANY response counts as reachable, whatever the status code
// - Any transport error (DNS, connect, TLS, timeout, ...) is unreachable
// - Relative and fragment links are resolved against the page URL first
//
// The probe is a trait so the health checker can be driven by fakes in
// tests; HttpProber is the real thing.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::InspectorConfig;
use crate::error::{AnalysisError, Result};

/// Checks whether a single link is reachable.
///
/// Implementations must not panic on bad input; anything that cannot be
/// probed is simply unreachable.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, link: &str) -> bool;
}

/// Probes links over HTTP relative to the page they were found on
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    base: Url,
}

impl HttpProber {
    pub fn new(base: Url, config: &InspectorConfig) -> Result<Self> {
        // Client is cheap to clone (it's just a reference counter internally),
        // every probe task shares the same connection pool
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.probe_timeout)
            .connect_timeout(connect_timeout(config.probe_timeout))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(AnalysisError::Client)?;

        Ok(Self { client, base })
    }

    // Turns an href into the absolute URL to request.
    //
    // Returns None for hrefs that don't resolve, or that resolve to a
    // scheme other than http/https (mailto:, javascript:, tel:, ...).
    pub fn resolve(&self, link: &str) -> Option<Url> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            // Likely a relative URL, try joining with base
            Err(_) => self.base.join(link).ok()?,
        };

        matches!(url.scheme(), "http" | "https").then_some(url)
    }
}

// Connecting should take a fraction of the whole budget
fn connect_timeout(total: Duration) -> Duration {
    (total / 2).max(Duration::from_millis(1))
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, link: &str) -> bool {
        let Some(url) = self.resolve(link) else {
            debug!(link, "not an http(s) link, counting as unreachable");
            return false;
        };

        match self.client.head(url).send().await {
            Ok(response) => {
                debug!(link, status = response.status().as_u16(), "link reachable");
                true
            }
            Err(e) => {
                debug!(link, error = %e, timeout = e.is_timeout(), "link unreachable");
                false
            }
        }
    }
}
