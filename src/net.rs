//! Network seams for DNS resolution and image fetching.
//!
//! The remote checks depend on these traits rather than on sockets
//! directly, so offline runs and tests never touch the network. Production
//! impls resolve through the system resolver and fetch over blocking HTTP
//! with a bounded per-request timeout.

use std::net::ToSocketAddrs;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
/// Failure modes for a remote image fetch. Timeouts are distinguished so
/// validators can report them separately from other transport errors.
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

/// DNS reachability seam.
pub trait DomainResolver: Sync {
    fn resolves(&self, host: &str) -> bool;
}

/// Remote image retrieval seam.
pub trait ImageFetcher: Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Resolver backed by the operating system lookup.
pub struct SystemResolver;

impl DomainResolver for SystemResolver {
    fn resolves(&self, host: &str) -> bool {
        // Port is irrelevant; only name resolution matters here.
        let resolved = (host, 80)
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false);
        debug!(host, resolved, "dns lookup");
        resolved
    }
}

/// Blocking HTTP fetcher with a per-request timeout.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "fetching image");
        let response = self.client.get(url).send().map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.bytes().map_err(classify)?;
        Ok(body.to_vec())
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}
