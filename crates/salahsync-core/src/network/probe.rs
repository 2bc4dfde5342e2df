//! Connectivity probing.
//!
//! Platform "online" events only say that an interface came up. A captive
//! portal or a dead uplink still looks online, so the monitor confirms with
//! a small HEAD request before trusting it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, redirect, Client};
use tracing::debug;

use crate::error::ProbeError;

/// Default endpoint for the connectivity check.
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com/favicon.ico";

/// Hard timeout for a single probe.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// `Ok(())` when the outside world is reachable.
    async fn probe(&self) -> Result<(), ProbeError>;
}

/// Probe that issues a cache-bypassing HEAD request to a fixed URL.
///
/// Redirects are not followed: a portal answering with a redirect is not
/// real connectivity. Clone is cheap, the inner client is reference counted.
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn with_defaults() -> Result<Self, ProbeError> {
        Self::new(
            DEFAULT_PROBE_URL,
            Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn probe(&self) -> Result<(), ProbeError> {
        let response = self
            .client
            .head(&self.url)
            .header(header::CACHE_CONTROL, "no-cache, no-store")
            .header(header::PRAGMA, "no-cache")
            .send()
            .await
            .map_err(ProbeError::from_transport)?;

        let status = response.status();
        debug!(url = %self.url, status = status.as_u16(), "Connectivity probe answered");
        if status.is_success() {
            Ok(())
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults_uses_default_url() {
        let probe = HttpProbe::with_defaults().unwrap();
        assert_eq!(probe.url(), DEFAULT_PROBE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        // Nothing listens on port 9 of localhost in a test environment
        let probe = HttpProbe::new("http://127.0.0.1:9/", Duration::from_secs(2)).unwrap();
        assert!(probe.probe().await.is_err());
    }

    #[tokio::test]
    async fn test_silent_endpoint_times_out() {
        // The kernel completes the handshake from the backlog; nobody answers
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        let timeout = Duration::from_millis(300);
        let probe = HttpProbe::new(url, timeout).unwrap();

        let started = std::time::Instant::now();
        let result = probe.probe().await;
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(ProbeError::Timeout)), "got {:?}", result);
        assert!(elapsed >= timeout);
        assert!(elapsed < timeout + Duration::from_secs(2));
        drop(listener);
    }
}
